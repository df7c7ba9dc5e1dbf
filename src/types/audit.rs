//! Derived audit categories.

use serde::{Deserialize, Serialize};

/// The six named username sets derived from one follower/following pair.
///
/// Every list is deduplicated and sorted case-insensitively, ties broken by
/// the exact string.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditSets {
    pub followers: Vec<String>,
    pub followings: Vec<String>,
    /// followers ∩ followings
    pub mutuals: Vec<String>,
    /// followers − followings
    pub i_dont_follow_back: Vec<String>,
    /// (followings − followers), unverified accounts only
    pub not_following_back: Vec<String>,
    /// (followings − followers), verified accounts only
    pub verified_not_following_back: Vec<String>,
}

/// Cardinality of each set in [`AuditSets`], in the same field order.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AuditCounts {
    pub followers: usize,
    pub followings: usize,
    pub mutuals: usize,
    pub i_dont_follow_back: usize,
    pub not_following_back: usize,
    pub verified_not_following_back: usize,
}

/// A derived category, as listed in the per-category report sections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditCategory {
    Mutuals,
    IDontFollowBack,
    NotFollowingBack,
    VerifiedNotFollowingBack,
}

impl AuditCategory {
    pub const ALL: [AuditCategory; 4] = [
        AuditCategory::Mutuals,
        AuditCategory::IDontFollowBack,
        AuditCategory::NotFollowingBack,
        AuditCategory::VerifiedNotFollowingBack,
    ];

    /// Stable key, used for file names and JSON keys.
    pub fn key(self) -> &'static str {
        match self {
            AuditCategory::Mutuals => "mutuals",
            AuditCategory::IDontFollowBack => "i_dont_follow_back",
            AuditCategory::NotFollowingBack => "not_following_back",
            AuditCategory::VerifiedNotFollowingBack => "verified_not_following_back",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuditCategory::Mutuals => "Mutuals",
            AuditCategory::IDontFollowBack => "I don't follow back",
            AuditCategory::NotFollowingBack => "Not following back",
            AuditCategory::VerifiedNotFollowingBack => "Not following back (verified)",
        }
    }
}

impl AuditSets {
    pub fn counts(&self) -> AuditCounts {
        AuditCounts {
            followers: self.followers.len(),
            followings: self.followings.len(),
            mutuals: self.mutuals.len(),
            i_dont_follow_back: self.i_dont_follow_back.len(),
            not_following_back: self.not_following_back.len(),
            verified_not_following_back: self.verified_not_following_back.len(),
        }
    }

    pub fn category(&self, category: AuditCategory) -> &[String] {
        match category {
            AuditCategory::Mutuals => &self.mutuals,
            AuditCategory::IDontFollowBack => &self.i_dont_follow_back,
            AuditCategory::NotFollowingBack => &self.not_following_back,
            AuditCategory::VerifiedNotFollowingBack => &self.verified_not_following_back,
        }
    }

    /// (label, count) rows for summary tables, followers and followings first.
    pub fn summary_rows(&self) -> Vec<(&'static str, usize)> {
        let mut rows = vec![
            ("Followers", self.followers.len()),
            ("Followings", self.followings.len()),
        ];
        rows.extend(
            AuditCategory::ALL
                .iter()
                .map(|c| (c.label(), self.category(*c).len())),
        );
        rows
    }
}
