//! In-memory record store loaded once from a zone-style text file.
//!
//! Each line reads `name [ttl] class type value`; anything after `;` is a
//! comment. Lines that do not yield all required fields are skipped with a
//! warning. Records for a repeated name accumulate in file order.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::ZoneError;

/// One stored record, kept in the textual form it was written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRecord {
    pub ttl: Option<u32>,
    pub class: String,
    pub rtype: String,
    pub value: String,
}

/// Read-only mapping from domain name to its records.
/// Names match exactly, case included.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<String, Vec<ZoneRecord>>,
}

impl RecordStore {
    /// Read and parse the record file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ZoneError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ZoneError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::parse(&text);
        debug!("Loaded {} names from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse record text, skipping lines that cannot be used
    pub fn parse(text: &str) -> Self {
        let mut records: HashMap<String, Vec<ZoneRecord>> = HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = strip_comment(raw);
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line) {
                Some((name, record)) => records.entry(name).or_default().push(record),
                None => warn!("Skipping record line {}: {:?}", index + 1, raw.trim()),
            }
        }

        RecordStore { records }
    }

    /// All records stored for `name`, in file order
    pub fn get(&self, name: &str) -> Option<&[ZoneRecord]> {
        self.records.get(name).map(Vec::as_slice)
    }

    /// First record for `name` whose type and class mnemonics both match
    pub fn find(&self, name: &str, rtype: &str, class: &str) -> Option<&ZoneRecord> {
        self.get(name)?
            .iter()
            .find(|r| r.rtype == rtype && r.class == class)
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once(';').map_or(line, |(before, _)| before)
}

/// Split one comment-free line into its name and record.
///
/// The second field is a TTL only if it parses as an integer; otherwise it
/// is taken as the class. An integer outside the `u32` range rejects the line.
fn parse_line(line: &str) -> Option<(String, ZoneRecord)> {
    let mut fields = line.split_whitespace().peekable();

    let name = fields.next()?;
    let ttl = match fields.peek().copied() {
        Some(field) if field.parse::<i128>().is_ok() => {
            let ttl = field.parse::<u32>().ok()?;
            fields.next();
            Some(ttl)
        }
        _ => None,
    };

    let class = fields.next()?;
    let rtype = fields.next()?;
    let value = fields.next()?;

    Some((
        name.to_string(),
        ZoneRecord {
            ttl,
            class: class.to_string(),
            rtype: rtype.to_string(),
            value: value.to_string(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONE: &str = "\
; sample zone
example.com 3600 IN A 93.184.216.34
example.com IN NS ns1.example.com ; nameserver
example.com 60 IN A 93.184.216.35

www.example.com IN A 10.0.0.1
broken.example.com IN A
   ; indented comment
";

    #[test]
    fn test_parse_with_and_without_ttl() {
        let store = RecordStore::parse(ZONE);
        let records = store.get("example.com").unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(
            records[0],
            ZoneRecord {
                ttl: Some(3600),
                class: "IN".to_string(),
                rtype: "A".to_string(),
                value: "93.184.216.34".to_string(),
            }
        );
        assert_eq!(records[1].ttl, None);
        assert_eq!(records[1].rtype, "NS");
        assert_eq!(records[1].value, "ns1.example.com");
        assert_eq!(records[2].ttl, Some(60));
    }

    #[test]
    fn test_later_lines_append() {
        let store = RecordStore::parse(ZONE);
        let values: Vec<_> = store
            .get("example.com")
            .unwrap()
            .iter()
            .map(|r| r.value.as_str())
            .collect();
        assert_eq!(values, ["93.184.216.34", "ns1.example.com", "93.184.216.35"]);
    }

    #[test]
    fn test_short_lines_skipped() {
        let store = RecordStore::parse(ZONE);
        assert!(store.get("broken.example.com").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_exact_name_match() {
        let store = RecordStore::parse(ZONE);
        assert!(store.get("www.example.com").is_some());
        assert!(store.get("WWW.example.com").is_none());
        assert!(store.get("example.com.").is_none());
    }

    #[test]
    fn test_ttl_only_line_is_skipped() {
        let store = RecordStore::parse("host 300 IN A\n");
        assert!(store.is_empty());
    }

    #[test]
    fn test_out_of_range_ttl_skips_line() {
        let store = RecordStore::parse(
            "host -5 IN A 1.2.3.4\nbig 4294967296 IN A 1.2.3.4\nok 4294967295 IN A 1.2.3.4\n",
        );
        assert!(store.get("host").is_none());
        assert!(store.get("big").is_none());
        assert_eq!(store.get("ok").unwrap()[0].ttl, Some(u32::MAX));
    }

    #[test]
    fn test_non_numeric_second_field_is_class() {
        let store = RecordStore::parse("host CH TXT hello\n");
        let record = &store.get("host").unwrap()[0];
        assert_eq!(record.ttl, None);
        assert_eq!(record.class, "CH");
        assert_eq!(record.rtype, "TXT");
        assert_eq!(record.value, "hello");
    }

    #[test]
    fn test_find_matches_type_and_class() {
        let store = RecordStore::parse(ZONE);
        let ns = store.find("example.com", "NS", "IN").unwrap();
        assert_eq!(ns.value, "ns1.example.com");
        assert!(store.find("example.com", "NS", "CH").is_none());
        assert!(store.find("missing.test", "A", "IN").is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let err = RecordStore::load("/nonexistent/zonedns/db.conf").unwrap_err();
        assert!(matches!(err, ZoneError::Read { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("zonedns-{}.conf", std::process::id()));
        fs::write(&path, ZONE).unwrap();

        let store = RecordStore::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(store.get("www.example.com").unwrap()[0].value, "10.0.0.1");
    }
}
