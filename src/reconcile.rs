//! Follower/following set reconciliation.
//!
//! Pure set algebra over usernames. Membership is case-sensitive: "Bob" and
//! "bob" are different accounts, though they sort next to each other.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use crate::types::{AuditSets, PersonRecord};

/// Case-insensitive order with a byte-order tie-break, so case variants of
/// one name always land in the same relative position.
pub fn username_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Deduplicate and sort usernames for output.
pub fn sorted_usernames<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let unique: BTreeSet<&str> = names.into_iter().collect();
    let mut out: Vec<String> = unique.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| username_order(a, b));
    out
}

/// Index records by username. When a username repeats, the record that
/// appears last in `records` wins.
pub fn index_by_username(records: &[PersonRecord]) -> HashMap<&str, &PersonRecord> {
    records.iter().map(|r| (r.username.as_str(), r)).collect()
}

/// Derive the six audit sets from the two edge lists.
///
/// Deterministic and side-effect free. The verified flag used to split
/// `followings − followers` is taken from the last following record for
/// each username.
pub fn reconcile(followers: &[PersonRecord], followings: &[PersonRecord]) -> AuditSets {
    let idx_followers = index_by_username(followers);
    let idx_followings = index_by_username(followings);

    let mutuals = idx_followers
        .keys()
        .filter(|u| idx_followings.contains_key(*u))
        .copied();
    let i_dont_follow_back = idx_followers
        .keys()
        .filter(|u| !idx_followings.contains_key(*u))
        .copied();

    let (verified, unverified): (Vec<&PersonRecord>, Vec<&PersonRecord>) = idx_followings
        .iter()
        .filter(|(u, _)| !idx_followers.contains_key(*u))
        .map(|(_, r)| *r)
        .partition(|r| r.is_verified);

    AuditSets {
        followers: sorted_usernames(idx_followers.keys().copied()),
        followings: sorted_usernames(idx_followings.keys().copied()),
        mutuals: sorted_usernames(mutuals),
        i_dont_follow_back: sorted_usernames(i_dont_follow_back),
        not_following_back: sorted_usernames(unverified.iter().map(|r| r.username.as_str())),
        verified_not_following_back: sorted_usernames(
            verified.iter().map(|r| r.username.as_str()),
        ),
    }
}
