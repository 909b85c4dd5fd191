// Code dictionaries: team and position abbreviation expansion.
//
// The table cells show raw abbreviated codes; detail lines show the
// dictionary-expanded full names. Unknown codes pass through verbatim so a
// stale dictionary degrades gracefully.

use std::collections::HashMap;

use serde::Deserialize;

/// Separator set for team fields ("TOR, BOS" / "TOR BOS").
pub const TEAM_SEPARATORS: &[char] = &[',', ' '];

/// Separator set for position fields ("C/R", "C, R").
pub const POSITION_SEPARATORS: &[char] = &['/', ',', ' '];

/// A code -> full-name lookup table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Dictionary { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }
}

/// The two dictionaries consumed by field expansion, deserialized from
/// `dictionaries.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dictionaries {
    pub teams: Dictionary,
    pub positions: Dictionary,
}

impl Dictionaries {
    /// Expand a raw team field to full franchise names.
    pub fn full_team_names(&self, raw: &str) -> String {
        expand_field(raw, TEAM_SEPARATORS, &self.teams)
    }

    /// Expand a raw position field to full position names.
    pub fn full_position_names(&self, raw: &str) -> String {
        expand_field(raw, POSITION_SEPARATORS, &self.positions)
    }
}

/// Expand a multi-value field: split the raw value on the separator set, map
/// each code through the dictionary (unmapped codes pass through), drop
/// duplicates preserving first-seen order, and join with ", ". Empty or
/// placeholder ("-") input yields an empty string.
pub fn expand_field(raw: &str, separators: &[char], dict: &Dictionary) -> String {
    let cleaned = raw.replace('"', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "-" {
        return String::new();
    }

    let mut seen = std::collections::HashSet::new();
    let mut out: Vec<String> = Vec::new();
    for code in cleaned.split(|c| separators.contains(&c)) {
        let code = code.trim();
        if code.is_empty() {
            continue;
        }
        let mapped = dict.get(code).unwrap_or(code);
        if seen.insert(mapped.to_string()) {
            out.push(mapped.to_string());
        }
    }
    out.join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
