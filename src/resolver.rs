use std::net::Ipv4Addr;

use tracing::{debug, warn};

use crate::dns_question_and_answer::{DnsAnswer, DnsQuestion};
use crate::dns_types::{type_name, RecordType};
use crate::zone::{RecordStore, ZoneRecord};

/// Turns a stored record's textual value into RDATA, or `None` if the
/// value cannot be encoded
type RdataEncoder = fn(&ZoneRecord) -> Option<Vec<u8>>;

/// Record types this server can answer, with their RDATA encoders.
/// A type missing from this table never produces an answer.
const ENCODERS: &[(RecordType, RdataEncoder)] = &[(RecordType::A, encode_a)];

fn encoder_for(qtype: u16) -> Option<(RecordType, RdataEncoder)> {
    ENCODERS
        .iter()
        .find(|(rtype, _)| rtype.to_u16() == qtype)
        .copied()
}

fn encode_a(record: &ZoneRecord) -> Option<Vec<u8>> {
    match record.value.parse::<Ipv4Addr>() {
        Ok(addr) => Some(addr.octets().to_vec()),
        Err(_) => {
            warn!("Stored A record has invalid IPv4 address {:?}", record.value);
            None
        }
    }
}

/// Build the answers for one question from the store.
///
/// A missing name, a type without an encoder, or a stored value that does
/// not encode all yield an empty list; the caller reports that as NXDOMAIN.
pub fn resolve(question: &DnsQuestion, store: &RecordStore) -> Vec<DnsAnswer> {
    let Some(records) = store.get(&question.name) else {
        debug!("No records for {}", question.name);
        return Vec::new();
    };

    let Some((rtype, encode)) = encoder_for(question.qtype) else {
        debug!("No answers for type {} ({})", type_name(question.qtype), question.qtype);
        return Vec::new();
    };

    // first stored record of the requested type
    records
        .iter()
        .find(|r| r.rtype == rtype.name())
        .and_then(|record| {
            let rdata = encode(record)?;
            Some(DnsAnswer::new(
                question.name.clone(),
                rtype.to_u16(),
                question.qclass,
                record.ttl.unwrap_or(0),
                rdata,
            ))
        })
        .into_iter()
        .collect()
}

/// Resolve every question in order, concatenating the answers
pub fn resolve_all(questions: &[DnsQuestion], store: &RecordStore) -> Vec<DnsAnswer> {
    questions
        .iter()
        .flat_map(|question| resolve(question, store))
        .collect()
}
