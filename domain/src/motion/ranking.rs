//! Motion ranking engine
//!
//! Produces the agenda order for the full set of pending motions: highest
//! parliamentary precedence (lowest rank number) first, longer caucus first
//! within a rank, insertion order on full ties. A pure function of the
//! motion set — called on every snapshot, its output is never persisted.

use super::entities::MotionData;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Agenda ordering between two motions.
///
/// Primary key: precedence rank ascending. Secondary key: effective caucus
/// seconds descending, so of two otherwise-equal motions the longer caucus
/// is taken up first. Equal on both keys compares `Equal`, which a stable
/// sort resolves to insertion order.
pub fn compare_motions(a: &MotionData, b: &MotionData) -> Ordering {
    a.kind
        .precedence()
        .cmp(&b.kind.precedence())
        .then_with(|| b.effective_caucus_seconds().cmp(&a.effective_caucus_seconds()))
}

/// Rank the pending motion set into final visible order.
///
/// Input keys are store push keys, so iterating the map visits motions in
/// insertion order; the stable sort preserves that order for full ties.
/// Deterministic: equal inputs produce equal output, with no hidden state.
pub fn rank(motions: &BTreeMap<String, MotionData>) -> Vec<String> {
    let mut entries: Vec<(&String, &MotionData)> = motions.iter().collect();
    entries.sort_by(|a, b| compare_motions(a.1, b.1));
    entries.into_iter().map(|(key, _)| key.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::unit::TimeUnit;
    use crate::motion::motion_type::MotionType;

    fn motion(kind: MotionType, minutes: u32) -> MotionData {
        MotionData::new(kind, "Delegate")
            .with_proposal("Topic")
            .with_caucus_duration(minutes, TimeUnit::Minutes)
    }

    fn set(entries: Vec<(&str, MotionData)>) -> BTreeMap<String, MotionData> {
        entries
            .into_iter()
            .map(|(k, m)| (k.to_string(), m))
            .collect()
    }

    #[test]
    fn test_rank_is_deterministic() {
        let motions = set(vec![
            ("-K0", motion(MotionType::OpenModeratedCaucus, 10)),
            ("-K1", motion(MotionType::ExtendUnmoderatedCaucus, 5)),
            ("-K2", motion(MotionType::VoteOnResolution, 15)),
        ]);
        assert_eq!(rank(&motions), rank(&motions));
    }

    #[test]
    fn test_higher_precedence_first() {
        // Close Moderated (rank 2) outranks Open Moderated (rank 5)
        // regardless of duration values
        let motions = set(vec![
            ("-K0", motion(MotionType::OpenModeratedCaucus, 60)),
            ("-K1", motion(MotionType::CloseModeratedCaucus, 1)),
        ]);
        assert_eq!(rank(&motions), vec!["-K1", "-K0"]);
    }

    #[test]
    fn test_tie_break_longer_caucus_first() {
        // A 10-minute and an 11-minute moderated caucus: the 11-minute
        // entry appears first
        let motions = set(vec![
            ("-K0", motion(MotionType::OpenModeratedCaucus, 10)),
            ("-K1", motion(MotionType::OpenModeratedCaucus, 11)),
        ]);
        assert_eq!(rank(&motions), vec!["-K1", "-K0"]);
    }

    #[test]
    fn test_full_tie_keeps_insertion_order() {
        // Identical rank and duration: insertion (push-key) order survives
        let motions = set(vec![
            ("-K0", motion(MotionType::OpenModeratedCaucus, 10)),
            ("-K1", motion(MotionType::OpenModeratedCaucus, 10)),
        ]);
        assert_eq!(rank(&motions), vec!["-K0", "-K1"]);
    }

    #[test]
    fn test_unknown_kind_sinks_to_bottom() {
        let motions = set(vec![
            ("-K0", motion(MotionType::Unknown, 10)),
            ("-K1", motion(MotionType::ReorderDraftResolutions, 10)),
            ("-K2", motion(MotionType::ExtendUnmoderatedCaucus, 10)),
        ]);
        assert_eq!(rank(&motions), vec!["-K2", "-K1", "-K0"]);
    }

    #[test]
    fn test_durationless_motion_participates_at_face_value() {
        // Equal rank 10: CloseDebate carries the 15-minute default, which
        // still beats a shorter VoteOnResolution in the tie-break
        let motions = set(vec![
            ("-K0", motion(MotionType::VoteOnResolution, 10)),
            ("-K1", motion(MotionType::CloseDebate, 15)),
        ]);
        assert_eq!(rank(&motions), vec!["-K1", "-K0"]);
    }

    #[test]
    fn test_agenda_order_across_the_table() {
        let motions = set(vec![
            ("-K0", motion(MotionType::VoteOnResolution, 15)),
            ("-K1", motion(MotionType::OpenModeratedCaucus, 10)),
            ("-K2", motion(MotionType::ExtendModeratedCaucus, 5)),
            ("-K3", motion(MotionType::OpenUnmoderatedCaucus, 20)),
            ("-K4", motion(MotionType::IntroduceDraftResolution, 15)),
        ]);
        assert_eq!(rank(&motions), vec!["-K2", "-K3", "-K1", "-K4", "-K0"]);
    }

    #[test]
    fn test_empty_set() {
        assert!(rank(&BTreeMap::new()).is_empty());
    }
}
