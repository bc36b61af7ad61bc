//! DNS message data model.
//!
//! Plain value types for the header, questions and resource records of an
//! RFC1035 message. Encoding and decoding live in [`crate::codec`].

/// Record type A (host address).
pub const TYPE_A: u16 = 1;
/// Record type SOA (start of authority).
pub const TYPE_SOA: u16 = 6;
/// Record type TXT (text strings).
pub const TYPE_TXT: u16 = 16;

/// Class IN (the Internet).
pub const CLASS_INET: u16 = 1;

/// QR bit: set on responses.
pub const FLAG_RESPONSE: u16 = 1 << 15;
/// AA bit: authoritative answer.
pub const FLAG_AUTHORITATIVE: u16 = 1 << 10;
/// TC bit: message truncated.
pub const FLAG_TRUNCATED: u16 = 1 << 9;
/// RD bit: recursion desired.
pub const FLAG_RECURSION_DESIRED: u16 = 1 << 8;
/// RA bit: recursion available.
pub const FLAG_RECURSION_AVAILABLE: u16 = 1 << 7;

const OPCODE_SHIFT: u16 = 11;
const OPCODE_MASK: u16 = 0x0f << OPCODE_SHIFT;
const RCODE_MASK: u16 = 0x000f;

/// RCODE 0: no error.
pub const RCODE_NOERROR: u8 = 0;
/// RCODE 3: the queried name does not exist.
pub const RCODE_NXDOMAIN: u8 = 3;

/// Size of the fixed message header in bytes.
pub const HEADER_LEN: usize = 12;

/// Maximum size of a non-extended UDP DNS message (RFC1035 §4.2.1).
pub const UDP_MAX_MESSAGE_SIZE: usize = 512;

/// Maximum length of a single label.
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of an encoded domain name, length bytes and terminator included.
pub const MAX_NAME_LEN: usize = 255;

/// The fixed 12-byte message header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub flags: u16,
    pub num_questions: u16,
    pub num_answers: u16,
    pub num_authorities: u16,
    pub num_additionals: u16,
}

impl Header {
    pub fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    /// The 4-bit operation code.
    pub fn opcode(&self) -> u8 {
        ((self.flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8
    }

    pub fn authoritative(&self) -> bool {
        self.flags & FLAG_AUTHORITATIVE != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TRUNCATED != 0
    }

    pub fn recursion_desired(&self) -> bool {
        self.flags & FLAG_RECURSION_DESIRED != 0
    }

    pub fn recursion_available(&self) -> bool {
        self.flags & FLAG_RECURSION_AVAILABLE != 0
    }

    /// The 4-bit response code.
    pub fn rcode(&self) -> u8 {
        (self.flags & RCODE_MASK) as u8
    }

    /// Builds the flags word from its fields. Z bits are always zero.
    pub fn pack_flags(response: bool, opcode: u8, recursion_desired: bool, rcode: u8) -> u16 {
        let mut flags = ((opcode as u16) << OPCODE_SHIFT) & OPCODE_MASK;
        flags |= rcode as u16 & RCODE_MASK;
        if response {
            flags |= FLAG_RESPONSE;
        }
        if recursion_desired {
            flags |= FLAG_RECURSION_DESIRED;
        }
        flags
    }
}

/// An entry of the question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Dot-joined domain name, e.g. `example.com`.
    pub name: String,
    pub qtype: u16,
    pub qclass: u16,
}

/// A resource record. The RDATA length on the wire is always `rdata.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: u16,
    pub rclass: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    /// Length of the RDATA, if it fits the 16-bit wire field.
    pub fn rdlength(&self) -> Option<u16> {
        u16::try_from(self.rdata.len()).ok()
    }
}

/// A complete DNS message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}
