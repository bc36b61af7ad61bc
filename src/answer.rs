//! Answer synthesis.
//!
//! The server answers TXT questions with a single configured payload and
//! leaves every other question unanswered.

use crate::message::{Question, ResourceRecord, CLASS_INET, TYPE_TXT};

/// TTL of synthesized records, in seconds.
pub const ANSWER_TTL: u32 = 1;

/// In-memory answer policy.
#[derive(Debug, Clone)]
pub struct AnswerPolicy {
    txt_payload: Vec<u8>,
}

impl AnswerPolicy {
    pub fn new(txt_payload: impl Into<Vec<u8>>) -> Self {
        Self {
            txt_payload: txt_payload.into(),
        }
    }

    /// Answers for one question, possibly none.
    pub fn synthesize(&self, question: &Question) -> Vec<ResourceRecord> {
        match question.qtype {
            TYPE_TXT => vec![ResourceRecord {
                name: question.name.clone(),
                rtype: TYPE_TXT,
                rclass: CLASS_INET,
                ttl: ANSWER_TTL,
                rdata: self.txt_payload.clone(),
            }],
            _ => Vec::new(),
        }
    }

    /// Answers for every question, concatenated in question order.
    pub fn synthesize_all(&self, questions: &[Question]) -> Vec<ResourceRecord> {
        questions.iter().flat_map(|q| self.synthesize(q)).collect()
    }
}
