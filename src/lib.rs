//! A small authoritative DNS server.
//!
//! Queries arrive over UDP, are decoded by [`dns_message`], answered from a
//! [`zone::RecordStore`] by [`resolver`], and encoded back onto the wire.
//! Names are encoded without compression, and compressed names in queries
//! are rejected.

pub mod dns_header;
pub mod dns_message;
pub mod dns_question_and_answer;
pub mod dns_types;
pub mod error;
pub mod options;
pub mod resolver;
pub mod server;
pub mod zone;
