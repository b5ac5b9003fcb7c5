use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding or encoding DNS messages
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("malformed message: {0}")]
    MalformedMessage(&'static str),

    #[error("label too long ({len} bytes, max 63): {label}")]
    LabelTooLong { label: String, len: usize },

    #[error("empty label in name: {0}")]
    EmptyLabel(String),

    #[error("null byte in name: {0:?}")]
    NullByte(String),

    #[error("name too long ({len} octets encoded, max 255): {name}")]
    NameTooLong { name: String, len: usize },
}

impl DnsError {
    pub fn malformed(reason: &'static str) -> Self {
        DnsError::MalformedMessage(reason)
    }
}

/// Errors raised while loading the record file
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("cannot read record file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors raised while reading command-line options
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("option {name} is {found}, not {expected}")]
    OptionTypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value for option {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Errors raised while setting up the UDP service
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to configure socket: {0}")]
    SocketOption(#[source] io::Error),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),
}
