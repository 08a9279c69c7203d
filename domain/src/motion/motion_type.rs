//! Motion types and the procedural metadata tables
//!
//! A closed enumeration of everything a delegate can move, plus the static
//! lookups the rest of the system keys off: precedence rank, which form
//! fields apply, and how the motion is voted. The match statements are
//! deliberately exhaustive so a new variant is a compile error until every
//! table covers it.

use serde::{Deserialize, Serialize};

/// Everything a delegate can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionType {
    ExtendUnmoderatedCaucus,
    ExtendModeratedCaucus,
    CloseModeratedCaucus,
    OpenUnmoderatedCaucus,
    OpenModeratedCaucus,
    IntroduceStrawpoll,
    IntroduceDraftResolution,
    IntroduceAmendment,
    SuspendDraftResolutionSpeakersList,
    OpenDebate,
    SuspendDebate,
    ResumeDebate,
    CloseDebate,
    VoteOnResolution,
    ReorderDraftResolutions,
    /// Decode fallback for motion kinds written by a newer peer
    #[serde(other)]
    Unknown,
}

impl MotionType {
    /// Parliamentary precedence rank; lower is taken up first.
    ///
    /// Unknown kinds get the sentinel 69 so they sink to the bottom of the
    /// agenda instead of being dropped.
    pub fn precedence(&self) -> u32 {
        match self {
            MotionType::ExtendUnmoderatedCaucus => 1,
            MotionType::ExtendModeratedCaucus => 2,
            MotionType::CloseModeratedCaucus => 2,
            MotionType::OpenUnmoderatedCaucus => 4,
            MotionType::OpenModeratedCaucus => 5,
            MotionType::IntroduceStrawpoll => 6,
            MotionType::IntroduceDraftResolution => 7,
            MotionType::IntroduceAmendment => 8,
            MotionType::SuspendDraftResolutionSpeakersList => 9,
            MotionType::OpenDebate => 10,
            MotionType::SuspendDebate => 10,
            MotionType::ResumeDebate => 10,
            MotionType::CloseDebate => 10,
            MotionType::VoteOnResolution => 10,
            MotionType::ReorderDraftResolutions => 11,
            MotionType::Unknown => 69,
        }
    }

    /// Whether the motion form shows a free-text detail field
    pub fn has_detail(&self) -> bool {
        matches!(
            self,
            MotionType::OpenModeratedCaucus
                | MotionType::IntroduceStrawpoll
                | MotionType::IntroduceDraftResolution
                | MotionType::IntroduceAmendment
                | MotionType::VoteOnResolution
        )
    }

    /// Whether the motion carries a caucus duration
    pub fn has_duration(&self) -> bool {
        matches!(
            self,
            MotionType::ExtendUnmoderatedCaucus
                | MotionType::ExtendModeratedCaucus
                | MotionType::OpenUnmoderatedCaucus
                | MotionType::OpenModeratedCaucus
        )
    }

    /// Whether the motion also carries a per-speaker duration
    pub fn has_speakers(&self) -> bool {
        matches!(
            self,
            MotionType::ExtendModeratedCaucus | MotionType::OpenModeratedCaucus
        )
    }

    /// Whether a second from the floor is required before voting
    pub fn has_seconder(&self) -> bool {
        matches!(
            self,
            MotionType::ExtendUnmoderatedCaucus
                | MotionType::ExtendModeratedCaucus
                | MotionType::CloseModeratedCaucus
                | MotionType::OpenUnmoderatedCaucus
                | MotionType::OpenModeratedCaucus
                | MotionType::IntroduceStrawpoll
        )
    }

    /// Procedural motions admit no abstentions; only voting on a
    /// resolution is substantive.
    pub fn is_procedural(&self) -> bool {
        !matches!(self, MotionType::VoteOnResolution | MotionType::Unknown)
    }

    /// Verb shown on the chair's action button
    pub fn action_name(&self) -> &'static str {
        match self {
            MotionType::ExtendUnmoderatedCaucus | MotionType::ExtendModeratedCaucus => "Extend",
            MotionType::CloseModeratedCaucus | MotionType::CloseDebate => "Close",
            MotionType::OpenUnmoderatedCaucus
            | MotionType::OpenModeratedCaucus
            | MotionType::OpenDebate => "Open",
            MotionType::IntroduceStrawpoll
            | MotionType::IntroduceDraftResolution
            | MotionType::IntroduceAmendment => "Introduce",
            MotionType::SuspendDraftResolutionSpeakersList | MotionType::SuspendDebate => {
                "Suspend"
            }
            MotionType::ResumeDebate => "Resume",
            MotionType::VoteOnResolution => "Vote",
            MotionType::ReorderDraftResolutions => "Reorder",
            MotionType::Unknown => "Approve",
        }
    }
}

impl std::fmt::Display for MotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MotionType::ExtendUnmoderatedCaucus => "Extend Unmoderated Caucus",
            MotionType::ExtendModeratedCaucus => "Extend Moderated Caucus",
            MotionType::CloseModeratedCaucus => "Close Moderated Caucus",
            MotionType::OpenUnmoderatedCaucus => "Open Unmoderated Caucus",
            MotionType::OpenModeratedCaucus => "Open Moderated Caucus",
            MotionType::IntroduceStrawpoll => "Introduce Strawpoll",
            MotionType::IntroduceDraftResolution => "Introduce Draft Resolution",
            MotionType::IntroduceAmendment => "Introduce Amendment",
            MotionType::SuspendDraftResolutionSpeakersList => {
                "Suspend Draft Resolution Speakers List"
            }
            MotionType::OpenDebate => "Open Debate",
            MotionType::SuspendDebate => "Suspend Debate",
            MotionType::ResumeDebate => "Resume Debate",
            MotionType::CloseDebate => "Close Debate",
            MotionType::VoteOnResolution => "Vote on Resolution",
            MotionType::ReorderDraftResolutions => "Reorder Draft Resolutions",
            MotionType::Unknown => "Unknown Motion",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_table_spot_checks() {
        assert_eq!(MotionType::ExtendUnmoderatedCaucus.precedence(), 1);
        assert_eq!(MotionType::CloseModeratedCaucus.precedence(), 2);
        assert_eq!(MotionType::OpenModeratedCaucus.precedence(), 5);
        assert_eq!(MotionType::VoteOnResolution.precedence(), 10);
        assert_eq!(MotionType::ReorderDraftResolutions.precedence(), 11);
        assert_eq!(MotionType::Unknown.precedence(), 69);
    }

    #[test]
    fn test_duration_tables() {
        assert!(MotionType::OpenModeratedCaucus.has_duration());
        assert!(MotionType::OpenModeratedCaucus.has_speakers());
        assert!(MotionType::OpenUnmoderatedCaucus.has_duration());
        assert!(!MotionType::OpenUnmoderatedCaucus.has_speakers());
        assert!(!MotionType::IntroduceDraftResolution.has_duration());
    }

    #[test]
    fn test_only_resolution_votes_are_substantive() {
        assert!(MotionType::OpenModeratedCaucus.is_procedural());
        assert!(MotionType::CloseDebate.is_procedural());
        assert!(!MotionType::VoteOnResolution.is_procedural());
    }

    #[test]
    fn test_unknown_kind_decodes_to_sentinel() {
        let kind: MotionType = serde_json::from_str(r#""motion_to_adjourn""#).unwrap();
        assert_eq!(kind, MotionType::Unknown);
        assert_eq!(kind.precedence(), 69);
    }

    #[test]
    fn test_known_kind_round_trips() {
        let kind = MotionType::OpenModeratedCaucus;
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, r#""open_moderated_caucus""#);
        assert_eq!(serde_json::from_str::<MotionType>(&json).unwrap(), kind);
    }
}
