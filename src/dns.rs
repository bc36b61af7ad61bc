//! Response assembly.
//!
//! This module builds response messages from a decoded query and the
//! synthesized answers, and runs the full decode/answer/encode pipeline
//! for one datagram.

use log::debug;

use crate::answer::AnswerPolicy;
use crate::codec::{decode_header, decode_question, encode_message};
use crate::errors::DnsError;
use crate::message::{
    Header, Message, Question, ResourceRecord, FLAG_TRUNCATED, RCODE_NOERROR, RCODE_NXDOMAIN,
    UDP_MAX_MESSAGE_SIZE,
};
use crate::utils::ByteReader;

/// Build the response message for a query.
///
/// The transaction ID, opcode and RD bit are echoed from the query; QR is
/// set and RA cleared. Counts are taken from the lists, never from the query.
pub fn assemble_response(
    query: &Header,
    questions: Vec<Question>,
    answers: Vec<ResourceRecord>,
) -> Result<Message, DnsError> {
    let rcode = if questions.is_empty() || !answers.is_empty() {
        RCODE_NOERROR
    } else {
        RCODE_NXDOMAIN
    };

    let header = Header {
        id: query.id,
        flags: Header::pack_flags(true, query.opcode(), query.recursion_desired(), rcode),
        num_questions: section_len("questions", questions.len())?,
        num_answers: section_len("answers", answers.len())?,
        num_authorities: 0,
        num_additionals: 0,
    };

    Ok(Message {
        header,
        questions,
        answers,
        authorities: Vec::new(),
        additionals: Vec::new(),
    })
}

fn section_len(section: &'static str, len: usize) -> Result<u16, DnsError> {
    u16::try_from(len).map_err(|_| DnsError::CountMismatch {
        section,
        declared: u16::MAX,
        actual: len,
    })
}

/// Generate the encoded response for one received datagram.
///
/// Any decode or encode failure is returned and no response should be sent.
/// A response over 512 bytes is sent with TC set and its answers removed.
pub fn generate_dns_response(query: &[u8], policy: &AnswerPolicy) -> Result<Vec<u8>, DnsError> {
    let mut reader = ByteReader::new(query);
    let header = decode_header(&mut reader)?;

    let questions = (0..header.num_questions)
        .map(|_| decode_question(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;
    for q in &questions {
        debug!("Question {} type {} class {}", q.name, q.qtype, q.qclass);
    }

    let answers = policy.synthesize_all(&questions);
    let mut message = assemble_response(&header, questions, answers)?;
    let encoded = encode_message(&message)?;
    if encoded.len() <= UDP_MAX_MESSAGE_SIZE {
        return Ok(encoded);
    }

    debug!(
        "Response of {} bytes exceeds {}, truncating",
        encoded.len(),
        UDP_MAX_MESSAGE_SIZE
    );
    truncate(&mut message);
    let encoded = encode_message(&message)?;
    if encoded.len() > UDP_MAX_MESSAGE_SIZE {
        return Err(DnsError::MessageTooLarge(encoded.len()));
    }
    Ok(encoded)
}

/// Drop every answer and mark the message truncated. The RCODE is kept.
fn truncate(message: &mut Message) {
    message.answers.clear();
    message.header.num_answers = 0;
    message.header.flags |= FLAG_TRUNCATED;
}
