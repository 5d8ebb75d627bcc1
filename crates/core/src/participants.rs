//! Participant identifier handling.
//!
//! Admins paste student codes as free text (`"S100, S200 ,S100"`). This module
//! turns that text into a clean list and defines the display order of
//! participants.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifiers as they arrive in a participants request body.
///
/// The add form sends one comma-separated string; the remove call sends an
/// array. Either shape is accepted on both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentifierInput {
    Text(String),
    List(Vec<String>),
}

impl IdentifierInput {
    /// Normalize into trimmed, non-empty, de-duplicated identifiers.
    pub fn identifiers(&self) -> Vec<String> {
        match self {
            IdentifierInput::Text(raw) => parse_identifier_list(raw),
            IdentifierInput::List(items) => dedup(
                items
                    .iter()
                    .flat_map(|item| item.split(','))
                    .map(str::trim)
                    .filter(|s| !s.is_empty()),
            ),
        }
    }

    /// Like [`identifiers`](Self::identifiers) but rejects an empty result.
    pub fn require_identifiers(&self) -> Result<Vec<String>, CoreError> {
        let ids = self.identifiers();
        if ids.is_empty() {
            return Err(CoreError::Validation(
                "At least one student ID is required".into(),
            ));
        }
        Ok(ids)
    }
}

/// Split comma-separated identifiers, trimming each entry and discarding
/// empties. Repeated identifiers collapse to their first occurrence.
pub fn parse_identifier_list(raw: &str) -> Vec<String> {
    dedup(raw.split(',').map(str::trim).filter(|s| !s.is_empty()))
}

fn dedup<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.iter().any(|existing| existing == item) {
            out.push(item.to_string());
        }
    }
    out
}

/// Numeric sort key of an identifying code. Codes that are not integers sort as 0.
pub fn code_sort_key(code: &str) -> i64 {
    code.trim().parse().unwrap_or(0)
}

/// Stable ascending sort by [`code_sort_key`].
pub fn sort_by_code<T>(items: &mut [T], code: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| code_sort_key(code(item)));
}
