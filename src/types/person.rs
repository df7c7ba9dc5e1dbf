//! Canonical person record.

use serde::{Deserialize, Serialize};

/// One account as returned by a follower/following edge, after normalization.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct PersonRecord {
    /// Handle, non-empty. Set membership is keyed on this, case-sensitively.
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    /// Numeric account id rendered as a string
    #[serde(rename = "pk", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub profile_pic_url: String,
}

impl PersonRecord {
    /// A record carrying only a username; every other field defaulted.
    pub fn bare(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: String::new(),
            id: None,
            is_verified: false,
            is_private: false,
            profile_pic_url: String::new(),
        }
    }

    pub fn verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }
}
