// ============================================================
// RAW RECORD
// ============================================================
// Header-keyed row produced by the CSV scanner

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed data row, keyed by the (trimmed) header names.
///
/// Keys are whatever headers the document carried; the record does not
/// know about domain fields. Once built it is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    /// Build a record by zipping headers with cell values.
    ///
    /// Both sides are trimmed. Cells past the last header are ignored and
    /// headers without a cell map to the empty string.
    pub fn from_row<H, C>(headers: &[H], cells: &[C]) -> Self
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = cells.get(idx).map(|c| c.as_ref().trim()).unwrap_or("");
                (header.as_ref().trim().to_string(), value.to_string())
            })
            .collect();

        Self { fields }
    }

    /// Value for a header, if the document had that column
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Value for a header, or "" when the column is absent
    pub fn value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when both records carry exactly the same header names
    pub fn same_keys(&self, other: &RawRecord) -> bool {
        self.fields.len() == other.fields.len()
            && self.fields.keys().all(|k| other.fields.contains_key(k))
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
