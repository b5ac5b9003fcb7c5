use bytes::{Buf, BufMut};

use crate::error::DnsError;

/// Size of the fixed DNS header on the wire
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsFlags {
    pub qr: bool,              // Query/Response (false = query, true = response)
    pub opcode: u8,            // Operation code (0 = standard query)
    pub aa: bool,              // Authoritative Answer
    pub tc: bool,              // Truncation
    pub rd: bool,              // Recursion Desired
    pub ra: bool,              // Recursion Available
    pub z: u8,                 // Reserved / authenticated bits
    pub rcode: u8,             // Response code (0 = no error, 3 = name error, etc.)
}

impl DnsFlags {
    pub fn to_u16(&self) -> u16 {
        let mut flags: u16 = 0;

        if self.qr { flags |= 1 << 15; }           // QR at bit 15
        flags |= (self.opcode as u16 & 0xF) << 11; // OPCODE at bits 11-14
        if self.aa { flags |= 1 << 10; }           // AA at bit 10
        if self.tc { flags |= 1 << 9; }            // TC at bit 9
        if self.rd { flags |= 1 << 8; }            // RD at bit 8
        if self.ra { flags |= 1 << 7; }            // RA at bit 7
        flags |= (self.z as u16 & 0x7) << 4;       // Z at bits 4-6
        flags |= self.rcode as u16 & 0xF;          // RCODE at bits 0-3

        flags
    }

    pub fn from_u16(flags: u16) -> Self {
        DnsFlags {
            qr: (flags & (1 << 15)) != 0,
            opcode: ((flags >> 11) & 0xF) as u8,
            aa: (flags & (1 << 10)) != 0,
            tc: (flags & (1 << 9)) != 0,
            rd: (flags & (1 << 8)) != 0,
            ra: (flags & (1 << 7)) != 0,
            z: ((flags >> 4) & 0x7) as u8,
            rcode: (flags & 0xF) as u8,
        }
    }
}

impl DnsHeader {
    /// Read the header from the front of `buf`, advancing it by 12 bytes
    pub fn read(buf: &mut &[u8]) -> Result<Self, DnsError> {
        if buf.remaining() < HEADER_LEN {
            return Err(DnsError::malformed("buffer too small for DNS header"));
        }

        Ok(DnsHeader {
            id: buf.get_u16(),
            flags: buf.get_u16(),
            question_count: buf.get_u16(),
            answer_count: buf.get_u16(),
            authority_count: buf.get_u16(),
            additional_count: buf.get_u16(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DnsError> {
        let mut cursor = bytes;
        Self::read(&mut cursor)
    }

    pub fn write<B: BufMut>(&self, out: &mut B) {
        out.put_u16(self.id);
        out.put_u16(self.flags);
        out.put_u16(self.question_count);
        out.put_u16(self.answer_count);
        out.put_u16(self.authority_count);
        out.put_u16(self.additional_count);
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        self.write(&mut &mut bytes[..]);
        bytes
    }

    pub fn flags(&self) -> DnsFlags {
        DnsFlags::from_u16(self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_bit_layout() {
        let flags = DnsFlags {
            qr: true,
            opcode: 0,
            rd: true,
            rcode: 3,
            ..Default::default()
        };
        assert_eq!(flags.to_u16(), 0x8103);

        let parsed = DnsFlags::from_u16(0x8103);
        assert_eq!(parsed, flags);
    }

    #[test]
    fn test_flags_every_field() {
        let flags = DnsFlags {
            qr: true,
            opcode: 2,
            aa: true,
            tc: true,
            rd: true,
            ra: true,
            z: 5,
            rcode: 9,
        };
        let raw = flags.to_u16();
        assert_eq!(raw, 0b1_0010_1_1_1_1_101_1001);
        assert_eq!(DnsFlags::from_u16(raw), flags);
    }

    #[test]
    fn test_header_big_endian() {
        let header = DnsHeader {
            id: 0x1234,
            flags: 0x0100,
            question_count: 1,
            answer_count: 2,
            authority_count: 0,
            additional_count: 0,
        };
        let bytes = header.to_bytes();
        assert_eq!(bytes, [0x12, 0x34, 0x01, 0x00, 0, 1, 0, 2, 0, 0, 0, 0]);
        assert_eq!(DnsHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_header_too_short() {
        let err = DnsHeader::from_bytes(&[0u8; 11]).unwrap_err();
        assert!(matches!(err, DnsError::MalformedMessage(_)));
    }

    #[test]
    fn test_read_advances_cursor() {
        let bytes = [0u8; 14];
        let mut cursor = &bytes[..];
        DnsHeader::read(&mut cursor).unwrap();
        assert_eq!(cursor.len(), 2);
    }
}
