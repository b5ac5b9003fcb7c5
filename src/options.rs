//! Command-line options and the server settings derived from them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 5353;
pub const DEFAULT_ZONE_FILE: &str = "db.conf";
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Parser, Debug)]
#[command(
    name = "zonedns",
    version,
    about = "A small authoritative DNS server answering from a record file"
)]
pub struct Cli {
    /// Record file to serve
    #[arg(short = 'f', long = "file", value_name = "PATH", default_value = DEFAULT_ZONE_FILE)]
    pub file: PathBuf,

    /// UDP port to listen on
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT as i64)]
    pub port: i64,

    /// Address to bind
    #[arg(short = 'b', long = "bind", default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Log each packet as a table
    #[arg(long = "dump-packets")]
    pub dump_packets: bool,
}

/// A parsed option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl OptionValue {
    fn kind(&self) -> &'static str {
        match self {
            OptionValue::Str(_) => "string",
            OptionValue::Int(_) => "integer",
            OptionValue::Bool(_) => "boolean",
        }
    }
}

/// Option values keyed by their long name
#[derive(Debug, Clone, Default)]
pub struct Options {
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn set(&mut self, name: &str, value: OptionValue) {
        self.values.insert(name.to_string(), value);
    }

    fn lookup(&self, name: &str) -> Result<&OptionValue, ConfigError> {
        self.values
            .get(name)
            .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))
    }

    fn mismatch(name: &str, expected: &'static str, found: &OptionValue) -> ConfigError {
        ConfigError::OptionTypeMismatch {
            name: name.to_string(),
            expected,
            found: found.kind(),
        }
    }

    pub fn get_str(&self, name: &str) -> Result<&str, ConfigError> {
        match self.lookup(name)? {
            OptionValue::Str(s) => Ok(s),
            other => Err(Self::mismatch(name, "string", other)),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64, ConfigError> {
        match self.lookup(name)? {
            OptionValue::Int(n) => Ok(*n),
            other => Err(Self::mismatch(name, "integer", other)),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, ConfigError> {
        match self.lookup(name)? {
            OptionValue::Bool(b) => Ok(*b),
            other => Err(Self::mismatch(name, "boolean", other)),
        }
    }
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        let mut options = Options::default();
        options.set("file", OptionValue::Str(cli.file.to_string_lossy().into_owned()));
        options.set("port", OptionValue::Int(cli.port));
        options.set("bind", OptionValue::Str(cli.bind));
        options.set("log-level", OptionValue::Str(cli.log_level));
        options.set("dump-packets", OptionValue::Bool(cli.dump_packets));
        options
    }
}

/// Settings the process runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub zone_file: PathBuf,
    pub bind: String,
    pub port: u16,
    pub log_level: String,
    pub dump_packets: bool,
}

impl ServerConfig {
    pub fn from_options(options: &Options) -> Result<Self, ConfigError> {
        let raw_port = options.get_int("port")?;
        let port = u16::try_from(raw_port).map_err(|_| ConfigError::InvalidValue {
            name: "port".to_string(),
            value: raw_port.to_string(),
        })?;

        let log_level = options.get_str("log-level")?.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                name: "log-level".to_string(),
                value: options.get_str("log-level")?.to_string(),
            });
        }

        Ok(ServerConfig {
            zone_file: PathBuf::from(options.get_str("file")?),
            bind: options.get_str("bind")?.to_string(),
            port,
            log_level,
            dump_packets: options.get_bool("dump-packets")?,
        })
    }

    /// `bind:port` for the UDP socket
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
