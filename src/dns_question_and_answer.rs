use std::fmt;

use bytes::{Buf, BufMut};

use crate::dns_types::{class_name, type_name, RecordClass, RecordType};
use crate::error::DnsError;

/// Longest label allowed by the length-byte encoding
pub const MAX_LABEL_LEN: usize = 63;
/// Longest encoded name, length bytes and terminator included
pub const MAX_NAME_LEN: usize = 255;

/// DNS Question Section
/// Format: QNAME + QTYPE (2 bytes) + QCLASS (2 bytes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub name: String, // Domain name (e.g., "example.com")
    pub qtype: u16,   // Query type (A, AAAA, CNAME, etc.)
    pub qclass: u16,  // Query class (usually IN for Internet)
}

/// DNS Answer/Resource Record Section
/// Format: NAME + TYPE (2 bytes) + CLASS (2 bytes) + TTL (4 bytes) + RDLENGTH (2 bytes) + RDATA
///
/// RDLENGTH is not stored; it is always written as `rdata.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsAnswer {
    pub name: String,   // Domain name
    pub rtype: u16,     // Record type (A, AAAA, CNAME, etc.)
    pub rclass: u16,    // Record class (usually IN for Internet)
    pub ttl: u32,       // Time to live in seconds
    pub rdata: Vec<u8>, // Resource data (format depends on record type)
}

impl DnsQuestion {
    pub fn new(name: impl Into<String>, qtype: RecordType, qclass: RecordClass) -> Self {
        DnsQuestion {
            name: name.into(),
            qtype: qtype.to_u16(),
            qclass: qclass.to_u16(),
        }
    }

    /// Parse a DNS question from the front of `buf`, advancing past it
    pub fn read(buf: &mut &[u8]) -> Result<Self, DnsError> {
        let name = read_domain_name(buf)?;

        if buf.remaining() < 4 {
            return Err(DnsError::malformed("buffer too small for question type and class"));
        }

        Ok(DnsQuestion {
            name,
            qtype: buf.get_u16(),
            qclass: buf.get_u16(),
        })
    }

    /// Write the question in wire format
    pub fn write<B: BufMut>(&self, out: &mut B) -> Result<(), DnsError> {
        write_domain_name(&self.name, out)?;
        out.put_u16(self.qtype);
        out.put_u16(self.qclass);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DnsError> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}

impl fmt::Display for DnsQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+------------------+-------------------+")?;
        writeln!(f, "|       Query Name | {}", self.name)?;
        writeln!(f, "|       Query Type | {:<17} |", type_name(self.qtype))?;
        writeln!(f, "|      Query Class | {:<17} |", class_name(self.qclass))?;
        writeln!(f, "+------------------+-------------------+")
    }
}

impl DnsAnswer {
    /// Create a new DNS answer with the given parameters
    pub fn new(name: String, rtype: u16, rclass: u16, ttl: u32, rdata: Vec<u8>) -> Self {
        DnsAnswer {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        }
    }

    /// Create an A record (IPv4 address) answer
    pub fn new_a_record(name: String, rclass: u16, ttl: u32, ip: [u8; 4]) -> Self {
        Self::new(name, RecordType::A.to_u16(), rclass, ttl, ip.to_vec())
    }

    pub fn rdlength(&self) -> usize {
        self.rdata.len()
    }

    /// Parse a resource record from the front of `buf`, advancing past it
    pub fn read(buf: &mut &[u8]) -> Result<Self, DnsError> {
        let name = read_domain_name(buf)?;

        if buf.remaining() < 10 {
            return Err(DnsError::malformed("buffer too small for answer fields"));
        }

        let rtype = buf.get_u16();
        let rclass = buf.get_u16();
        let ttl = buf.get_u32();
        let rdlength = buf.get_u16() as usize;

        if buf.remaining() < rdlength {
            return Err(DnsError::malformed("buffer too small for RDATA"));
        }

        let rdata = buf[..rdlength].to_vec();
        buf.advance(rdlength);

        Ok(DnsAnswer {
            name,
            rtype,
            rclass,
            ttl,
            rdata,
        })
    }

    /// Write the record in wire format
    pub fn write<B: BufMut>(&self, out: &mut B) -> Result<(), DnsError> {
        let rdlength = u16::try_from(self.rdata.len())
            .map_err(|_| DnsError::malformed("RDATA longer than 65535 bytes"))?;

        write_domain_name(&self.name, out)?;
        out.put_u16(self.rtype);
        out.put_u16(self.rclass);
        out.put_u32(self.ttl);
        out.put_u16(rdlength);
        out.put_slice(&self.rdata);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, DnsError> {
        let mut bytes = Vec::new();
        self.write(&mut bytes)?;
        Ok(bytes)
    }
}

/// Read a domain name as length-prefixed labels up to the zero terminator.
///
/// Compression pointers are not part of the supported subset: a length byte
/// with either of its top two bits set is rejected instead of followed.
pub fn read_domain_name(buf: &mut &[u8]) -> Result<String, DnsError> {
    let mut name = String::new();
    let mut encoded_len = 0usize;

    loop {
        if !buf.has_remaining() {
            return Err(DnsError::malformed("name runs past end of buffer"));
        }

        let length = buf.get_u8() as usize;
        encoded_len += 1 + length;

        if length == 0 {
            break;
        }
        if length & 0xC0 != 0 {
            return Err(DnsError::malformed("compressed or extended labels are not supported"));
        }
        // leave room for the terminator
        if encoded_len >= MAX_NAME_LEN {
            return Err(DnsError::malformed("name longer than 255 octets"));
        }
        if buf.remaining() < length {
            return Err(DnsError::malformed("label extends beyond buffer"));
        }

        let label = std::str::from_utf8(&buf[..length])
            .map_err(|_| DnsError::malformed("invalid UTF-8 in domain label"))?;
        if label.contains('\0') {
            return Err(DnsError::malformed("null byte inside label"));
        }
        if label.contains('.') {
            return Err(DnsError::malformed("dot inside label"));
        }

        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(label);
        buf.advance(length);
    }

    Ok(name)
}

/// Parse a domain name from `bytes` at `offset`, returning it with the new offset
pub fn parse_domain_name(bytes: &[u8], offset: usize) -> Result<(String, usize), DnsError> {
    let mut cursor = bytes
        .get(offset..)
        .ok_or_else(|| DnsError::malformed("offset out of bounds"))?;
    let name = read_domain_name(&mut cursor)?;
    Ok((name, bytes.len() - cursor.len()))
}

/// Write a domain name in DNS message format
/// Format: length-prefixed labels terminated with a null byte
/// Example: "example.com" -> [7]example[3]com[0]
pub fn write_domain_name<B: BufMut>(name: &str, out: &mut B) -> Result<(), DnsError> {
    if name.contains('\0') {
        return Err(DnsError::NullByte(name.to_string()));
    }

    let trimmed = name.strip_suffix('.').unwrap_or(name);

    // Root domain
    if trimmed.is_empty() {
        out.put_u8(0);
        return Ok(());
    }

    let mut encoded_len = 1;
    for label in trimmed.split('.') {
        let label_bytes = label.as_bytes();
        if label_bytes.is_empty() {
            return Err(DnsError::EmptyLabel(name.to_string()));
        }
        if label_bytes.len() > MAX_LABEL_LEN {
            return Err(DnsError::LabelTooLong {
                label: label.to_string(),
                len: label_bytes.len(),
            });
        }
        encoded_len += 1 + label_bytes.len();
    }
    if encoded_len > MAX_NAME_LEN {
        return Err(DnsError::NameTooLong {
            name: name.to_string(),
            len: encoded_len,
        });
    }

    for label in trimmed.split('.') {
        out.put_u8(label.len() as u8);
        out.put_slice(label.as_bytes());
    }
    out.put_u8(0);

    Ok(())
}

pub fn encode_domain_name(name: &str) -> Result<Vec<u8>, DnsError> {
    let mut encoded = Vec::new();
    write_domain_name(name, &mut encoded)?;
    Ok(encoded)
}
