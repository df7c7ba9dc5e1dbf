//! Report emitters.
//!
//! - `csv`: raw and per-category person tables
//! - `snapshot`: JSON dump of a whole run
//! - `markdown`: human-readable report with summary and category tables
//! - `text`: console summary and the legacy plain-text listing
//!
//! [`write_all_outputs`] writes every format into one directory.

mod csv;
mod markdown;
mod snapshot;
mod text;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

pub use self::csv::{render_csv, CSV_COLUMNS};
pub use markdown::{markdown_table, render_markdown};
pub use snapshot::Snapshot;
pub use text::{render_legacy_listing, render_summary};

use crate::{
    prelude::*,
    reconcile::{index_by_username, reconcile},
    types::{AuditCategory, PersonRecord},
    Error,
};

/// Username → record view over both edge lists.
///
/// Followings are consulted first, then followers; within a list the last
/// record for a username wins.
#[derive(Debug)]
pub struct RecordLookup<'a> {
    followings: HashMap<&'a str, &'a PersonRecord>,
    followers: HashMap<&'a str, &'a PersonRecord>,
}

impl<'a> RecordLookup<'a> {
    pub fn new(followers: &'a [PersonRecord], followings: &'a [PersonRecord]) -> Self {
        Self {
            followings: index_by_username(followings),
            followers: index_by_username(followers),
        }
    }

    pub fn get(&self, username: &str) -> Option<&'a PersonRecord> {
        self.followings
            .get(username)
            .or_else(|| self.followers.get(username))
            .copied()
    }

    /// Record for `username`, or a username-only placeholder.
    pub fn get_or_bare(&self, username: &str) -> PersonRecord {
        self.get(username)
            .cloned()
            .unwrap_or_else(|| PersonRecord::bare(username))
    }
}

/// One file produced by [`write_all_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub label: String,
    pub path: PathBuf,
}

/// Name of the legacy plain-text listing for `username`.
pub fn legacy_listing_file_name(username: &str) -> String {
    format!("Non_Abonne_En_Retour_De_{username}.txt")
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).map_err(|e| Error::io(path.display(), e))?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote report file");
    Ok(())
}

/// Write every report for one run into `out_dir`, creating it if needed.
///
/// Returns the written files in write order.
pub fn write_all_outputs(
    username: &str,
    followers: &[PersonRecord],
    followings: &[PersonRecord],
    out_dir: &Path,
) -> Result<Vec<OutputFile>> {
    write_all_outputs_at(username, followers, followings, out_dir, Utc::now())
}

/// [`write_all_outputs`] with an explicit generation timestamp.
pub fn write_all_outputs_at(
    username: &str,
    followers: &[PersonRecord],
    followings: &[PersonRecord],
    out_dir: &Path,
    generated: DateTime<Utc>,
) -> Result<Vec<OutputFile>> {
    std::fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir.display(), e))?;

    let sets = reconcile(followers, followings);
    let lookup = RecordLookup::new(followers, followings);
    let mut outputs = Vec::new();

    let mut emit = |label: &str, file_name: String, contents: String| -> Result<()> {
        let path = out_dir.join(file_name);
        write_file(&path, &contents)?;
        outputs.push(OutputFile {
            label: label.to_string(),
            path,
        });
        Ok(())
    };

    emit("followers", "followers.csv".into(), render_csv(followers))?;
    emit("followings", "followings.csv".into(), render_csv(followings))?;

    for category in AuditCategory::ALL {
        let rows: Vec<PersonRecord> = sets
            .category(category)
            .iter()
            .map(|u| lookup.get_or_bare(u))
            .collect();
        emit(category.key(), format!("{}.csv", category.key()), render_csv(&rows))?;
    }

    let snapshot = Snapshot::new(username, &sets, followers, followings, generated);
    let json =
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::json_parse(e.to_string()))?;
    emit("snapshot_json", "snapshot.json".into(), json)?;

    emit(
        "summary_md",
        "summary.md".into(),
        render_markdown(username, &sets, &lookup, generated),
    )?;

    emit(
        "legacy_txt",
        legacy_listing_file_name(username),
        render_legacy_listing(username, &sets),
    )?;

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn person(username: &str, full_name: &str, verified: bool, private: bool) -> PersonRecord {
        PersonRecord {
            username: username.to_string(),
            full_name: full_name.to_string(),
            id: Some(format!("{}", username.len())),
            is_verified: verified,
            is_private: private,
            profile_pic_url: String::new(),
        }
    }

    fn fixture() -> (Vec<PersonRecord>, Vec<PersonRecord>) {
        let followers = vec![
            person("alice", "Alice A", false, true),
            person("bob", "Bob B", false, false),
        ];
        let followings = vec![
            person("bob", "Bob B", false, false),
            person("carol", "Carol, C", true, false),
        ];
        (followers, followings)
    }

    #[test]
    fn test_writes_every_file_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out").join("me");
        let (followers, followings) = fixture();
        let generated = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let outputs =
            write_all_outputs_at("me", &followers, &followings, &out_dir, generated).unwrap();

        let labels: Vec<&str> = outputs.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "followers",
                "followings",
                "mutuals",
                "i_dont_follow_back",
                "not_following_back",
                "verified_not_following_back",
                "snapshot_json",
                "summary_md",
                "legacy_txt",
            ]
        );
        for output in &outputs {
            assert!(output.path.exists(), "{}", output.path.display());
        }
        assert_eq!(
            outputs[8].path.file_name().unwrap(),
            "Non_Abonne_En_Retour_De_me.txt"
        );
    }

    #[test]
    fn test_derived_csv_contents() {
        let dir = tempfile::tempdir().unwrap();
        let (followers, followings) = fixture();
        write_all_outputs("me", &followers, &followings, dir.path()).unwrap();

        let verified = std::fs::read_to_string(dir.path().join("verified_not_following_back.csv"))
            .unwrap();
        assert_eq!(
            verified,
            "username,full_name,is_verified,is_private,pk,profile_pic_url\r\n\
             carol,\"Carol, C\",True,False,5,\r\n"
        );

        // Follower-only accounts fall back to the follower record
        let idfb = std::fs::read_to_string(dir.path().join("i_dont_follow_back.csv")).unwrap();
        assert!(idfb.contains("alice,Alice A,False,True,5,"));

        let empty = std::fs::read_to_string(dir.path().join("not_following_back.csv")).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let (followers, followings) = fixture();
        write_all_outputs("me", &followers, &followings, dir.path()).unwrap();

        let text = std::fs::read_to_string(dir.path().join("snapshot.json")).unwrap();
        let snapshot: Snapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snapshot.username, "me");
        assert_eq!(snapshot.sets.mutuals, vec!["bob"]);
        assert_eq!(snapshot.counts.verified_not_following_back, 1);
        assert_eq!(snapshot.followings, followings);
    }

    #[test]
    fn test_markdown_report() {
        let (followers, followings) = fixture();
        let sets = reconcile(&followers, &followings);
        let lookup = RecordLookup::new(&followers, &followings);
        let generated = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let md = render_markdown("me", &sets, &lookup, generated);

        assert!(md.starts_with(
            "# Instagram audit for **me**\n\n_Generated: 2024-01-02 03:04:05Z_\n\n"
        ));
        assert!(md.contains("| Mutuals                       | 1     |\n"));
        assert!(md.contains("## Not following back (verified) (1)\n\n"));
        assert!(md.contains("| 1 | carol    | Carol, C  | ✅        |         |\n"));
        // alice only follows; her row still comes from the follower record
        assert!(md.contains("| 1 | alice    | Alice A   |          | 🔒       |\n"));
    }

    #[test]
    fn test_lookup_prefers_followings() {
        let followers = vec![person("bob", "From followers", false, false)];
        let followings = vec![person("bob", "From followings", false, false)];
        let lookup = RecordLookup::new(&followers, &followings);
        assert_eq!(lookup.get("bob").unwrap().full_name, "From followings");
        assert_eq!(lookup.get_or_bare("nobody"), PersonRecord::bare("nobody"));
    }
}
