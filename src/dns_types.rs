//! Fixed tables bridging protocol codes and their textual mnemonics.
//!
//! The record file names types and classes by mnemonic ("A", "IN") while
//! the wire carries 16-bit codes, so lookups go through these tables in
//! both directions.

/// Common DNS record types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A = 1,     // IPv4 address
    NS = 2,    // Name server
    CNAME = 5, // Canonical name
    SOA = 6,   // Start of authority
    PTR = 12,  // Pointer record
    MX = 15,   // Mail exchange
    TXT = 16,  // Text record
    AAAA = 28, // IPv6 address
    SRV = 33,  // Service locator
    ANY = 255, // Any type
}

/// Common DNS classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    IN = 1,    // Internet
    CS = 2,    // CSNET (obsolete)
    CH = 3,    // CHAOS
    HS = 4,    // Hesiod
    ANY = 255, // Any class
}

const TYPE_NAMES: &[(RecordType, &str)] = &[
    (RecordType::A, "A"),
    (RecordType::NS, "NS"),
    (RecordType::CNAME, "CNAME"),
    (RecordType::SOA, "SOA"),
    (RecordType::PTR, "PTR"),
    (RecordType::MX, "MX"),
    (RecordType::TXT, "TXT"),
    (RecordType::AAAA, "AAAA"),
    (RecordType::SRV, "SRV"),
    (RecordType::ANY, "ANY"),
];

const CLASS_NAMES: &[(RecordClass, &str)] = &[
    (RecordClass::IN, "IN"),
    (RecordClass::CS, "CS"),
    (RecordClass::CH, "CH"),
    (RecordClass::HS, "HS"),
    (RecordClass::ANY, "ANY"),
];

/// Mnemonic printed for codes missing from the tables
pub const UNKNOWN: &str = "UNKNOWN";

/// Standard query opcode
pub const OPCODE_QUERY: u8 = 0;

/// Response codes used by this server
pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_NXDOMAIN: u8 = 3;

impl RecordType {
    pub fn from_u16(value: u16) -> Option<Self> {
        TYPE_NAMES
            .iter()
            .find(|(t, _)| *t as u16 == value)
            .map(|(t, _)| *t)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        TYPE_NAMES.iter().find(|(_, n)| *n == name).map(|(t, _)| *t)
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        TYPE_NAMES
            .iter()
            .find(|(t, _)| *t == self)
            .map_or(UNKNOWN, |(_, n)| *n)
    }
}

impl RecordClass {
    pub fn from_u16(value: u16) -> Option<Self> {
        CLASS_NAMES
            .iter()
            .find(|(c, _)| *c as u16 == value)
            .map(|(c, _)| *c)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CLASS_NAMES.iter().find(|(_, n)| *n == name).map(|(c, _)| *c)
    }

    pub fn to_u16(self) -> u16 {
        self as u16
    }

    pub fn name(self) -> &'static str {
        CLASS_NAMES
            .iter()
            .find(|(c, _)| *c == self)
            .map_or(UNKNOWN, |(_, n)| *n)
    }
}

/// Mnemonic for a wire type code, or `UNKNOWN`
pub fn type_name(code: u16) -> &'static str {
    RecordType::from_u16(code).map_or(UNKNOWN, RecordType::name)
}

/// Mnemonic for a wire class code, or `UNKNOWN`
pub fn class_name(code: u16) -> &'static str {
    RecordClass::from_u16(code).map_or(UNKNOWN, RecordClass::name)
}
