/// Region normalization.
///
/// Raw region labels in wine exports are inconsistent (" burgundy ",
/// "BURGUNDY", "Burgundy"). Every region comparison in the crate goes through
/// `NormalizedRegion`, never through the raw string.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A region label after trimming and title-casing.
///
/// ```
/// use winestats::NormalizedRegion;
///
/// let region = NormalizedRegion::new("  côte de NUITS ");
/// assert_eq!(region.as_str(), "Côte De Nuits");
/// assert_eq!(NormalizedRegion::new(region.as_str()), region);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedRegion(String);

impl NormalizedRegion {
    pub fn new(raw: &str) -> Self {
        NormalizedRegion(title_case(raw.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when `raw` normalizes to this region.
    pub fn matches(&self, raw: &str) -> bool {
        NormalizedRegion::new(raw) == *self
    }
}

impl fmt::Display for NormalizedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Deserialized labels are normalized like any other input
impl<'de> Deserialize<'de> for NormalizedRegion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(|raw| NormalizedRegion::new(&raw))
    }
}

impl From<&str> for NormalizedRegion {
    fn from(raw: &str) -> Self {
        NormalizedRegion::new(raw)
    }
}

impl From<String> for NormalizedRegion {
    fn from(raw: String) -> Self {
        NormalizedRegion::new(&raw)
    }
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
/// Non-letters (spaces, digits, apostrophes, hyphens) start a new run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                // Multi-char upper-case mappings keep only their head upper-cased
                let mut upper = c.to_uppercase();
                if let Some(head) = upper.next() {
                    out.push(head);
                }
                for rest in upper {
                    out.extend(rest.to_lowercase());
                }
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}
