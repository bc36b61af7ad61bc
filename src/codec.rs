//! DNS wire codec.
//!
//! Fixed-layout, big-endian packing of headers, questions and resource
//! records. No name compression is emitted or accepted.

use crate::errors::DnsError;
use crate::message::{Header, Message, Question, ResourceRecord, HEADER_LEN};
use crate::utils::{decode_dns_name, encode_dns_name, ByteReader};

/// Decode the 12-byte header at the cursor.
pub fn decode_header(reader: &mut ByteReader<'_>) -> Result<Header, DnsError> {
    let remaining = reader.remaining();
    if remaining < HEADER_LEN {
        return Err(DnsError::MalformedMessage("header", HEADER_LEN, remaining));
    }

    Ok(Header {
        id: reader.read_u16("id")?,
        flags: reader.read_u16("flags")?,
        num_questions: reader.read_u16("question count")?,
        num_answers: reader.read_u16("answer count")?,
        num_authorities: reader.read_u16("authority count")?,
        num_additionals: reader.read_u16("additional count")?,
    })
}

/// Append the header in wire order.
pub fn encode_header(header: &Header, out: &mut Vec<u8>) {
    out.extend_from_slice(&header.id.to_be_bytes());
    out.extend_from_slice(&header.flags.to_be_bytes());
    out.extend_from_slice(&header.num_questions.to_be_bytes());
    out.extend_from_slice(&header.num_answers.to_be_bytes());
    out.extend_from_slice(&header.num_authorities.to_be_bytes());
    out.extend_from_slice(&header.num_additionals.to_be_bytes());
}

pub fn decode_question(reader: &mut ByteReader<'_>) -> Result<Question, DnsError> {
    Ok(Question {
        name: decode_dns_name(reader)?,
        qtype: reader.read_u16("question type")?,
        qclass: reader.read_u16("question class")?,
    })
}

pub fn encode_question(question: &Question, out: &mut Vec<u8>) -> Result<(), DnsError> {
    out.extend_from_slice(&encode_dns_name(&question.name)?);
    out.extend_from_slice(&question.qtype.to_be_bytes());
    out.extend_from_slice(&question.qclass.to_be_bytes());
    Ok(())
}

pub fn decode_resource_record(reader: &mut ByteReader<'_>) -> Result<ResourceRecord, DnsError> {
    let name = decode_dns_name(reader)?;
    let rtype = reader.read_u16("record type")?;
    let rclass = reader.read_u16("record class")?;
    let ttl = reader.read_u32("record ttl")?;
    let rdlength = reader.read_u16("rdata length")?;
    let rdata = reader.read_bytes(rdlength as usize, "rdata")?.to_vec();

    Ok(ResourceRecord {
        name,
        rtype,
        rclass,
        ttl,
        rdata,
    })
}

/// Append a resource record. The RDATA length field is derived from the RDATA.
pub fn encode_resource_record(rr: &ResourceRecord, out: &mut Vec<u8>) -> Result<(), DnsError> {
    let rdlength = rr.rdlength().ok_or(DnsError::RdataTooLong(rr.rdata.len()))?;

    out.extend_from_slice(&encode_dns_name(&rr.name)?);
    out.extend_from_slice(&rr.rtype.to_be_bytes());
    out.extend_from_slice(&rr.rclass.to_be_bytes());
    out.extend_from_slice(&rr.ttl.to_be_bytes());
    out.extend_from_slice(&rdlength.to_be_bytes());
    out.extend_from_slice(&rr.rdata);
    Ok(())
}

fn check_count(section: &'static str, declared: u16, actual: usize) -> Result<(), DnsError> {
    if declared as usize != actual {
        return Err(DnsError::CountMismatch {
            section,
            declared,
            actual,
        });
    }
    Ok(())
}

/// Serialize a whole message into one contiguous buffer.
///
/// Fails if any header count disagrees with its record list.
pub fn encode_message(message: &Message) -> Result<Vec<u8>, DnsError> {
    let header = &message.header;
    check_count("questions", header.num_questions, message.questions.len())?;
    check_count("answers", header.num_answers, message.answers.len())?;
    check_count("authorities", header.num_authorities, message.authorities.len())?;
    check_count("additionals", header.num_additionals, message.additionals.len())?;

    let mut out = Vec::with_capacity(512);
    encode_header(header, &mut out);
    for question in &message.questions {
        encode_question(question, &mut out)?;
    }
    for rr in message
        .answers
        .iter()
        .chain(&message.authorities)
        .chain(&message.additionals)
    {
        encode_resource_record(rr, &mut out)?;
    }
    Ok(out)
}

/// Decode a whole message, reading exactly as many entries as the header declares.
/// Trailing bytes are ignored.
pub fn decode_message(bytes: &[u8]) -> Result<Message, DnsError> {
    let mut reader = ByteReader::new(bytes);
    let header = decode_header(&mut reader)?;

    let questions = (0..header.num_questions)
        .map(|_| decode_question(&mut reader))
        .collect::<Result<Vec<_>, _>>()?;
    let mut records = |count: u16| {
        (0..count)
            .map(|_| decode_resource_record(&mut reader))
            .collect::<Result<Vec<_>, _>>()
    };
    let answers = records(header.num_answers)?;
    let authorities = records(header.num_authorities)?;
    let additionals = records(header.num_additionals)?;

    Ok(Message {
        header,
        questions,
        answers,
        authorities,
        additionals,
    })
}
