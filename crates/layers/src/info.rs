//! Side data shown for the selected region.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

/// One row of side data. `region` is matched against display names
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoRecord {
    #[serde(alias = "state", alias = "name")]
    pub region: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InfoRecord {
    pub fn new(region: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            text: text.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Read-only lookup table built once from the loaded records.
#[derive(Debug, Clone, Default)]
pub struct InfoDataset {
    by_key: HashMap<String, Vec<InfoRecord>>,
    len: usize,
}

impl InfoDataset {
    pub fn from_records(records: impl IntoIterator<Item = InfoRecord>) -> Self {
        let mut by_key: HashMap<String, Vec<InfoRecord>> = HashMap::new();
        let mut len = 0;
        for record in records {
            let key = lookup_key(&record.region);
            if key.is_empty() {
                continue;
            }
            by_key.entry(key).or_default().push(record);
            len += 1;
        }
        info!(records = len, keys = by_key.len(), "info dataset loaded");
        Self { by_key, len }
    }

    /// Parses a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<InfoRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Every record keyed by `name`, in load order. Empty for unknown names.
    pub fn lookup(&self, name: &str) -> &[InfoRecord] {
        self.by_key
            .get(&lookup_key(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn lookup_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Human-readable form of an internal region name: underscores become
/// spaces and each word is title-cased (`"new_york"` -> `"New York"`).
pub fn display_name(internal: &str) -> String {
    internal
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InfoPanel {
    pub visible: bool,
    pub title: String,
    pub entries: Vec<InfoRecord>,
}

impl InfoPanel {
    pub fn show(&mut self, title: impl Into<String>, entries: Vec<InfoRecord>) {
        self.visible = true;
        self.title = title.into();
        self.entries = entries;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.title.clear();
        self.entries.clear();
    }
}
