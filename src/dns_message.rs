use std::fmt;

use bytes::BytesMut;

use crate::dns_header::{DnsFlags, DnsHeader};
use crate::dns_question_and_answer::{DnsAnswer, DnsQuestion};
use crate::dns_types::{OPCODE_QUERY, RCODE_NOERROR, RCODE_NXDOMAIN};
use crate::error::DnsError;

/// A DNS message as handled by this server: header, questions and answers.
/// Authority and additional sections are never populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub header: DnsHeader,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<DnsAnswer>,
}

impl DnsMessage {
    /// Decode an inbound query: the header and its question section.
    /// Answer, authority and additional sections are ignored.
    pub fn decode(buf: &[u8]) -> Result<Self, DnsError> {
        let mut cursor = buf;
        let header = DnsHeader::read(&mut cursor)?;

        let mut questions = Vec::with_capacity(header.question_count.min(16) as usize);
        for _ in 0..header.question_count {
            questions.push(DnsQuestion::read(&mut cursor)?);
        }

        Ok(DnsMessage {
            header,
            questions,
            answers: Vec::new(),
        })
    }

    /// Decode a message including its answer section
    pub fn decode_with_answers(buf: &[u8]) -> Result<Self, DnsError> {
        let mut cursor = buf;
        let header = DnsHeader::read(&mut cursor)?;

        let mut questions = Vec::new();
        for _ in 0..header.question_count {
            questions.push(DnsQuestion::read(&mut cursor)?);
        }

        let mut answers = Vec::new();
        for _ in 0..header.answer_count {
            answers.push(DnsAnswer::read(&mut cursor)?);
        }

        Ok(DnsMessage {
            header,
            questions,
            answers,
        })
    }

    pub fn flags(&self) -> DnsFlags {
        self.header.flags()
    }
}

/// Create response header based on request header.
/// The counts are taken from what will actually be serialized.
pub fn create_response_header(
    request_header: &DnsHeader,
    question_count: u16,
    answer_count: u16,
) -> DnsHeader {
    let response_flags = DnsFlags {
        qr: true,             // This is a response
        opcode: OPCODE_QUERY, // Standard query
        aa: false,
        tc: false,
        rd: false,
        ra: false, // Recursion not available
        z: 0,
        rcode: if answer_count == 0 {
            RCODE_NXDOMAIN
        } else {
            RCODE_NOERROR
        },
    };

    DnsHeader {
        id: request_header.id, // Echo request ID
        flags: response_flags.to_u16(),
        question_count,
        answer_count,
        authority_count: 0,
        additional_count: 0,
    }
}

/// Build the complete DNS response message: the request's questions echoed
/// back, followed by the answers
pub fn encode(
    request_header: &DnsHeader,
    questions: &[DnsQuestion],
    answers: &[DnsAnswer],
) -> Result<Vec<u8>, DnsError> {
    let question_count = u16::try_from(questions.len())
        .map_err(|_| DnsError::malformed("too many questions"))?;
    let answer_count = u16::try_from(answers.len())
        .map_err(|_| DnsError::malformed("too many answers"))?;

    let header = create_response_header(request_header, question_count, answer_count);

    let mut response = BytesMut::with_capacity(512);
    header.write(&mut response);

    for question in questions {
        question.write(&mut response)?;
    }

    for answer in answers {
        answer.write(&mut response)?;
    }

    Ok(response.to_vec())
}

impl fmt::Display for DnsMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(f, "+------------------+-------------------+")?;
        writeln!(f, "|                 DNS                  |")?;
        writeln!(f, "+------------------+-------------------+")?;
        writeln!(f, "|   Transaction ID | {:<17} |", format!("{:#06x}", h.id))?;
        writeln!(f, "|            Flags | {:<17} |", format!("{:#06x}", h.flags))?;
        writeln!(f, "|        Questions | {:<17} |", h.question_count)?;
        writeln!(f, "|       Answer RRs | {:<17} |", h.answer_count)?;
        writeln!(f, "|    Authority RRs | {:<17} |", h.authority_count)?;
        writeln!(f, "|   Additional RRs | {:<17} |", h.additional_count)?;
        writeln!(f, "+------------------+-------------------+")?;
        writeln!(f, "|               Queries                |")?;
        for question in &self.questions {
            write!(f, "{}", question)?;
        }
        Ok(())
    }
}
