//! JSON snapshot of one run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{AuditCounts, AuditSets, PersonRecord};

/// Everything a run observed: metadata, counts, the derived sets and both
/// normalized edge lists.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub username: String,
    /// ISO-8601 UTC with microseconds and a trailing `Z`
    pub generated_utc: String,
    pub counts: AuditCounts,
    pub sets: AuditSets,
    pub followers: Vec<PersonRecord>,
    pub followings: Vec<PersonRecord>,
}

impl Snapshot {
    pub fn new(
        username: &str,
        sets: &AuditSets,
        followers: &[PersonRecord],
        followings: &[PersonRecord],
        generated: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.to_string(),
            generated_utc: generated.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
            counts: sets.counts(),
            sets: sets.clone(),
            followers: followers.to_vec(),
            followings: followings.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_snapshot_shape() {
        let generated = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();
        let followers = vec![PersonRecord::bare("alice")];
        let sets = crate::reconcile(&followers, &[]);
        let snapshot = Snapshot::new("me", &sets, &followers, &[], generated);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["generated_utc"], "2024-05-01T08:30:00.000000Z");
        assert_eq!(value["counts"]["followers"], 1);
        assert_eq!(value["counts"]["i_dont_follow_back"], 1);
        assert_eq!(value["sets"]["i_dont_follow_back"][0], "alice");
        assert_eq!(value["followers"][0]["pk"], serde_json::Value::Null);
        assert_eq!(value["followers"][0]["is_verified"], false);
    }
}
