//! Voting thresholds derived from the committee roll
//!
//! All thresholds are ceilings over the count of members who can vote:
//! quorum at one half, draft-resolution signatories at one quarter,
//! amendment signatories at one tenth.

use super::entities::MemberRecord;
use serde::{Deserialize, Serialize};

/// Derived statistics over the committee roll
///
/// Recomputed from the member map on every snapshot; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CommitteeStats {
    /// Members in the room
    pub present: usize,
    /// Members who count toward votes (present and voting)
    pub voting: usize,
    /// Minimum members for debate to proceed
    pub quorum: usize,
    /// Signatories required to introduce a draft resolution
    pub draft_resolution_threshold: usize,
    /// Signatories required to introduce an amendment
    pub amendment_threshold: usize,
}

impl CommitteeStats {
    /// Derive all statistics from the current roll
    pub fn derive<'a>(members: impl IntoIterator<Item = &'a MemberRecord>) -> Self {
        let mut present = 0;
        let mut voting = 0;
        for member in members {
            if member.present {
                present += 1;
            }
            if member.can_vote() {
                voting += 1;
            }
        }

        Self {
            present,
            voting,
            quorum: ceil_fraction(voting, 0.5),
            draft_resolution_threshold: ceil_fraction(voting, 0.25),
            amendment_threshold: ceil_fraction(voting, 0.1),
        }
    }

    /// Simple majority among those voting
    pub fn majority(&self) -> usize {
        self.voting / 2 + 1
    }

    pub fn has_quorum(&self) -> bool {
        self.present >= self.quorum
    }
}

fn ceil_fraction(count: usize, fraction: f64) -> usize {
    (count as f64 * fraction).ceil() as usize
}
