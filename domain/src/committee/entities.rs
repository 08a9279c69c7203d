//! Committee domain entities

use crate::caucus::entities::CaucusState;
use crate::motion::entities::MotionData;
use crate::timer::entities::TimerState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standing of a member within the committee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MemberRank {
    #[default]
    Standard,
    Veto,
    NGO,
    Observer,
}

/// One seat on the committee roll (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberRecord {
    pub name: String,
    pub present: bool,
    pub voting: bool,
    pub rank: MemberRank,
}

impl Default for MemberRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            present: true,
            voting: true,
            rank: MemberRank::Standard,
        }
    }
}

impl MemberRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn observer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voting: false,
            rank: MemberRank::Observer,
            ..Self::default()
        }
    }

    /// Whether this seat counts toward voting thresholds
    pub fn can_vote(&self) -> bool {
        self.present && self.voting
    }
}

/// The whole shared committee document (Aggregate Root)
///
/// This is the value stored at `committees/{id}`; every connected viewer
/// holds a read-mostly replica of it via subscription. Collections are
/// keyed by store push keys, so map order is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CommitteeState {
    pub name: String,
    pub chair: String,
    /// Clock for unmoderated caucuses, owned by the committee itself
    pub timer: TimerState,
    pub members: BTreeMap<String, MemberRecord>,
    pub caucuses: BTreeMap<String, CaucusState>,
    pub motions: BTreeMap<String, MotionData>,
}

impl CommitteeState {
    pub fn new(name: impl Into<String>, chair: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chair: chair.into(),
            ..Self::default()
        }
    }
}
