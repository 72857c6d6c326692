use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated locale tag, e.g. `"en"`, `"de"`, or `"pt-BR"`.
///
/// Collections and the favorites detail cache are scoped per locale; the
/// membership set is not (a favorite is a favorite in every language).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a tag, validating its shape.
    ///
    /// Accepts ASCII alphanumeric segments separated by `-`, between 2 and
    /// 35 characters total (the BCP 47 upper bound).
    pub fn new(tag: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        if !is_valid_tag(&tag) {
            return Err(CoreError::invalid_locale(tag));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_tag(tag: &str) -> bool {
    if tag.len() < 2 || tag.len() > 35 {
        return false;
    }
    if tag.starts_with('-') || tag.ends_with('-') || tag.contains("--") {
        return false;
    }
    tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
