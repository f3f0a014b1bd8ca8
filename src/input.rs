use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use num_bigint::BigUint;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{InputError, ShamirError};
use crate::field::PrimeField;
use crate::lagrange::reconstruct;
use crate::radix::Radix;
use crate::share::Share;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Keys {
    /// Number of shares that were issued. Informational only.
    #[serde(default)]
    pub n: Option<usize>,
    /// Reconstruction threshold.
    pub k: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum BaseField {
    Number(u32),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
struct RawRecord {
    base: BaseField,
    value: String,
}

#[derive(Deserialize)]
struct RawDocument {
    keys: Keys,
    #[serde(flatten)]
    records: BTreeMap<String, RawRecord>,
}

/// One encoded share as it appears in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRecord {
    pub id: u64,
    pub base: u32,
    pub value: String,
}

impl ShareRecord {
    pub fn decode(&self) -> Result<Share, InputError> {
        let radix = Radix::new(self.base)?;
        Ok(Share::from_encoded(self.id, &self.value, radix)?)
    }
}

/// A set of encoded shares together with its threshold:
///
/// ```json
/// { "keys": { "n": 4, "k": 3 },
///   "1": { "base": "10", "value": "4" },
///   "2": { "base": "2", "value": "111" } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareDocument {
    pub keys: Keys,
    /// Sorted by ascending `id`.
    pub records: Vec<ShareRecord>,
}

impl ShareDocument {
    pub fn from_json_str(json: &str) -> Result<Self, InputError> {
        let raw: RawDocument = serde_json::from_str(json)?;

        let mut records = Vec::with_capacity(raw.records.len());
        for (key, record) in raw.records {
            let id = parse_share_id(&key)?;
            let base = match record.base {
                BaseField::Number(b) => b,
                BaseField::Text(s) => s
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| InputError::MalformedBase(s.clone()))?,
            };
            records.push(ShareRecord {
                id,
                base,
                value: record.value,
            });
        }
        records.sort_by_key(|r| r.id);

        if let Some(pair) = records.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(InputError::InvalidShareId(format!(
                "duplicate identifier {}",
                pair[0].id
            )));
        }

        if let Some(n) = raw.keys.n {
            if n != records.len() {
                warn!(declared = n, found = records.len(), "share count differs from keys.n");
            }
        }

        Ok(ShareDocument {
            keys: raw.keys,
            records,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn threshold(&self) -> usize {
        self.keys.k
    }

    /// Decodes the first `k` records in identifier order.
    pub fn shares(&self) -> Result<Vec<Share>, InputError> {
        let k = self.threshold();
        if self.records.len() < k {
            return Err(ShamirError::MissingShare {
                threshold: k,
                found: self.records.len(),
            }
            .into());
        }
        self.records[..k].iter().map(ShareRecord::decode).collect()
    }

    pub fn reconstruct(&self, field: &PrimeField) -> Result<BigUint, InputError> {
        let shares = self.shares()?;
        debug!(k = self.threshold(), records = self.records.len(), "decoded shares");
        Ok(reconstruct(&shares, self.threshold(), field)?)
    }
}

fn parse_share_id(key: &str) -> Result<u64, InputError> {
    let invalid = || InputError::InvalidShareId(key.to_owned());
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match key.parse::<u64>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(id) => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = r#"{
        "keys": { "n": 4, "k": 3 },
        "1": { "base": "10", "value": "4" },
        "2": { "base": "2", "value": "111" },
        "3": { "base": "10", "value": "10" },
        "6": { "base": "4", "value": "213" }
    }"#;

    #[test]
    fn parses_document() {
        let doc = ShareDocument::from_json_str(LINE).unwrap();
        assert_eq!(doc.keys, Keys { n: Some(4), k: 3 });
        let ids: Vec<u64> = doc.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 6]);
        assert_eq!(doc.records[3].base, 4);
    }

    #[test]
    fn decodes_first_k_shares() {
        let doc = ShareDocument::from_json_str(LINE).unwrap();
        let shares = doc.shares().unwrap();
        assert_eq!(
            shares,
            vec![
                Share::new(1u32, 4u32),
                Share::new(2u32, 7u32),
                Share::new(3u32, 10u32)
            ]
        );
        assert_eq!(doc.reconstruct(&PrimeField::default()).unwrap(), BigUint::from(1u32));
    }

    #[test]
    fn gap_in_identifiers_uses_next_records() {
        // Ids 1, 2, 4 of y = 3x + 1; id 3 was never supplied.
        let json = r#"{
            "keys": { "n": 4, "k": 3 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "10", "value": "7" },
            "4": { "base": "10", "value": "13" }
        }"#;
        let doc = ShareDocument::from_json_str(json).unwrap();
        let ids: Vec<u64> = doc.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(doc.shares().unwrap()[2], Share::new(4u32, 13u32));
        assert_eq!(doc.reconstruct(&PrimeField::default()).unwrap(), BigUint::from(1u32));
    }

    #[test]
    fn numeric_base_is_accepted() {
        let json = r#"{ "keys": { "k": 1 }, "1": { "base": 16, "value": "ff" } }"#;
        let doc = ShareDocument::from_json_str(json).unwrap();
        assert_eq!(doc.shares().unwrap(), vec![Share::new(1u32, 255u32)]);
    }

    #[test]
    fn missing_share() {
        let json = r#"{
            "keys": { "n": 3, "k": 3 },
            "1": { "base": "10", "value": "4" },
            "2": { "base": "10", "value": "7" }
        }"#;
        let doc = ShareDocument::from_json_str(json).unwrap();
        assert!(matches!(
            doc.reconstruct(&PrimeField::default()),
            Err(InputError::Shamir(ShamirError::MissingShare { threshold: 3, found: 2 }))
        ));
    }

    #[test]
    fn bad_digit_in_used_share() {
        let json = r#"{ "keys": { "k": 2 },
            "1": { "base": "2", "value": "12" },
            "2": { "base": "10", "value": "7" } }"#;
        let doc = ShareDocument::from_json_str(json).unwrap();
        assert!(matches!(
            doc.shares(),
            Err(InputError::Shamir(ShamirError::InvalidDigit { digit: '2', base: 2 }))
        ));
    }

    #[test]
    fn bad_digit_in_unused_share_is_ignored() {
        let json = r#"{ "keys": { "k": 1 },
            "1": { "base": "10", "value": "7" },
            "2": { "base": "2", "value": "zz" } }"#;
        let doc = ShareDocument::from_json_str(json).unwrap();
        assert_eq!(doc.reconstruct(&PrimeField::default()).unwrap(), BigUint::from(7u32));
    }

    #[test]
    fn unsupported_base() {
        let json = r#"{ "keys": { "k": 1 }, "1": { "base": "40", "value": "1" } }"#;
        let doc = ShareDocument::from_json_str(json).unwrap();
        assert!(matches!(doc.shares(), Err(InputError::UnsupportedBase(40))));

        let json = r#"{ "keys": { "k": 1 }, "1": { "base": "ten", "value": "1" } }"#;
        assert!(matches!(
            ShareDocument::from_json_str(json),
            Err(InputError::MalformedBase(b)) if b == "ten"
        ));
    }

    #[test]
    fn rejects_bad_identifiers() {
        for key in ["0", "x", "-1", "+1", ""] {
            let json = format!(r#"{{ "keys": {{ "k": 1 }}, "{key}": {{ "base": "10", "value": "1" }} }}"#);
            assert!(
                matches!(ShareDocument::from_json_str(&json), Err(InputError::InvalidShareId(_))),
                "key {key:?}"
            );
        }
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let json = r#"{ "keys": { "k": 2 },
            "1": { "base": "10", "value": "4" },
            "01": { "base": "10", "value": "4" } }"#;
        assert!(matches!(
            ShareDocument::from_json_str(json),
            Err(InputError::InvalidShareId(_))
        ));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            ShareDocument::from_json_str("{ \"keys\": "),
            Err(InputError::Json(_))
        ));
        assert!(matches!(
            ShareDocument::from_json_str(r#"{ "1": { "base": "10", "value": "4" } }"#),
            Err(InputError::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = ShareDocument::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }
}
