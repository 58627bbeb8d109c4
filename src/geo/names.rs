use serde::Deserialize;
use std::collections::HashMap;

use crate::error::DataJoinError;

#[derive(Debug, Deserialize)]
struct NameRow {
    id: String,
    name: String,
}

/// Identifier to display name, as read from the `id,name` table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NameTable {
    names: HashMap<String, String>,
}

impl NameTable {
    pub fn from_csv(text: &str) -> Result<Self, DataJoinError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        let mut names = HashMap::new();
        for row in reader.deserialize::<NameRow>() {
            let row = row?;
            if row.name.is_empty() {
                continue;
            }
            // First entry for an identifier wins.
            names.entry(normalize_id(&row.id)).or_insert(row.name);
        }
        Ok(Self { names })
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.names.get(&normalize_id(id)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Trim, and drop leading zeros from purely numeric ids ("004" == "4").
pub fn normalize_id(raw: &str) -> String {
    let id = raw.trim();
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = id.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        id.to_string()
    }
}
