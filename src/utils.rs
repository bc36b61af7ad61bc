//! Utility functions for DNS operations.
//!
//! This module provides a bounds-checked byte cursor and helpers for
//! encoding and decoding domain names in DNS wire format.

use crate::errors::DnsError;
use crate::message::{MAX_LABEL_LEN, MAX_NAME_LEN};

/// Top two bits of a length byte mark a compression pointer.
const POINTER_MASK: u8 = 0xC0;

/// A read cursor over a received datagram.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Read `len` bytes, naming `field` in the error if the buffer runs out.
    pub fn read_bytes(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], DnsError> {
        if len > self.remaining() {
            return Err(DnsError::TruncatedMessage(field));
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, DnsError> {
        Ok(self.read_bytes(1, field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DnsError> {
        let b = self.read_bytes(2, field)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DnsError> {
        let b = self.read_bytes(4, field)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Decode a domain name at the cursor.
///
/// Labels are joined with `.`; the root name decodes to an empty string.
/// Compression pointers are rejected.
pub fn decode_dns_name(reader: &mut ByteReader<'_>) -> Result<String, DnsError> {
    let mut domain = String::new();

    loop {
        let len = reader.read_u8("label length")?;
        if len == 0 {
            break;
        }
        if len & POINTER_MASK == POINTER_MASK {
            return Err(DnsError::UnsupportedFeature("name compression pointer"));
        }
        if len as usize > MAX_LABEL_LEN {
            return Err(DnsError::TruncatedMessage("label length"));
        }

        let label = reader.read_bytes(len as usize, "label")?;
        if !domain.is_empty() {
            domain.push('.');
        }
        domain.push_str(&String::from_utf8_lossy(label));
    }

    Ok(domain)
}

/// Encode a domain name in DNS wire format.
///
/// A single trailing dot is accepted; the empty name encodes as the root.
pub fn encode_dns_name(name: &str) -> Result<Vec<u8>, DnsError> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    let mut out = Vec::with_capacity(trimmed.len() + 2);

    if !trimmed.is_empty() {
        for label in trimmed.split('.') {
            if label.is_empty() {
                return Err(DnsError::EmptyLabel(name.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(DnsError::LabelTooLong(format!(
                    "label of {} bytes in {:?}",
                    label.len(),
                    name
                )));
            }
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }
    out.push(0);

    if out.len() > MAX_NAME_LEN {
        return Err(DnsError::LabelTooLong(format!(
            "name encodes to {} bytes",
            out.len()
        )));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<String, DnsError> {
        decode_dns_name(&mut ByteReader::new(bytes))
    }

    #[test]
    fn encodes_length_prefixed_labels() {
        assert_eq!(
            encode_dns_name("example.com").unwrap(),
            b"\x07example\x03com\x00".to_vec()
        );
        assert_eq!(encode_dns_name("example.com.").unwrap(), encode_dns_name("example.com").unwrap());
        assert_eq!(encode_dns_name("").unwrap(), vec![0]);
    }

    #[test]
    fn name_round_trips() {
        let max_label = "a".repeat(63);
        // 4 * (1 + 61) + (1 + 3) + 1 = 253 bytes
        let long_name = format!("{0}.{0}.{0}.{0}.abc", "b".repeat(61));
        for name in ["example.com", "a.b.c.d.e", "xn--bcher-kva.example", max_label.as_str(), long_name.as_str()] {
            let wire = encode_dns_name(name).unwrap();
            assert!(wire.len() <= MAX_NAME_LEN);
            assert_eq!(decode(&wire).unwrap(), name);
        }
    }

    #[test]
    fn rejects_oversized_label_and_name() {
        let err = encode_dns_name(&format!("{}.com", "a".repeat(64))).unwrap_err();
        assert!(matches!(err, DnsError::LabelTooLong(_)));

        // 5 * (1 + 50) + 1 = 256 bytes
        let name = vec!["c".repeat(50); 5].join(".");
        let err = encode_dns_name(&name).unwrap_err();
        assert!(matches!(err, DnsError::LabelTooLong(_)));
    }

    #[test]
    fn rejects_empty_interior_label() {
        let err = encode_dns_name("a..b").unwrap_err();
        assert!(matches!(err, DnsError::EmptyLabel(_)));
    }

    #[test]
    fn decode_stops_at_root_and_leaves_cursor_after_it() {
        let mut reader = ByteReader::new(b"\x03www\x00\x00\x10");
        assert_eq!(decode_dns_name(&mut reader).unwrap(), "www");
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_u16("type").unwrap(), 16);
    }

    #[test]
    fn decode_fails_on_missing_terminator() {
        assert!(matches!(decode(b"\x07example"), Err(DnsError::TruncatedMessage(_))));
        assert!(matches!(decode(b"\x07exa"), Err(DnsError::TruncatedMessage("label"))));
        assert!(matches!(decode(b""), Err(DnsError::TruncatedMessage("label length"))));
    }

    #[test]
    fn decode_rejects_invalid_length_byte() {
        let mut wire = vec![0x40];
        wire.extend_from_slice(&[b'a'; 64]);
        wire.push(0);
        assert!(matches!(decode(&wire), Err(DnsError::TruncatedMessage("label length"))));
    }

    #[test]
    fn dotted_wire_label_reencodes_as_two_labels() {
        let name = decode(b"\x03a.b\x00").unwrap();
        assert_eq!(name, "a.b");
        assert_eq!(encode_dns_name(&name).unwrap(), b"\x01a\x01b\x00".to_vec());
    }

    #[test]
    fn decode_rejects_compression_pointer() {
        assert!(matches!(
            decode(b"\x03www\xc0\x0c"),
            Err(DnsError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn reader_reads_big_endian() {
        let mut reader = ByteReader::new(&[0x12, 0x34, 0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(reader.read_u16("id").unwrap(), 0x1234);
        assert_eq!(reader.read_u32("ttl").unwrap(), 0xdeadbeef);
        assert_eq!(reader.remaining(), 0);
        assert!(reader.read_u8("extra").is_err());
    }
}
