//! Stable display order for cluster members.

use crate::cluster::Member;

/// Sort members ascending by name.
///
/// Names compare byte-wise, so uppercase sorts before lowercase and no
/// locale rules apply.
pub fn sort_members(mut members: Vec<Member>) -> Vec<Member> {
    members.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    members
}
