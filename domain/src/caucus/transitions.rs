//! Whole-state caucus transitions
//!
//! "Next speaker" touches three fields at once (queue, speaking, history).
//! Modeling it as one function over the whole [`CaucusState`] keeps the
//! observable inconsistency window down to a single store write.

use super::entities::CaucusState;
use crate::core::error::DomainError;
use crate::timer::entities::TimerState;

/// Advance the caucus to its next speaker.
///
/// Removes the oldest queue entry and puts it on the floor; the member
/// previously speaking (if any) moves to history under `history_key`
/// (minted by the caller from the store's key generator so history keeps
/// chronological order). The speaker timer is reset to `speaker_reset`.
///
/// Returns the next whole state; the caller commits it as one write.
pub fn advance_speaker(
    state: &CaucusState,
    history_key: &str,
    speaker_reset: TimerState,
) -> Result<CaucusState, DomainError> {
    let next_key = state.next_in_queue().cloned().ok_or(DomainError::EmptyQueue)?;

    let mut next = state.clone();
    let up_next = next
        .queue
        .remove(&next_key)
        .ok_or(DomainError::EmptyQueue)?;

    if let Some(finished) = next.speaking.take() {
        next.history.insert(history_key.to_string(), finished);
    }

    next.speaking = Some(up_next);
    next.speaker_timer = speaker_reset;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caucus::entities::{SpeakerEvent, Stance};

    fn caucus_with_queue(names: &[&str]) -> CaucusState {
        let mut caucus = CaucusState::open("Topic", 600, 60);
        for (i, name) in names.iter().enumerate() {
            caucus.queue.insert(
                format!("-K{:04}", i),
                SpeakerEvent::new(*name, Stance::Neutral, 60),
            );
        }
        caucus
    }

    #[test]
    fn test_advance_assigns_oldest_entry() {
        let caucus = caucus_with_queue(&["France", "Ghana", "Chile"]);
        let next = advance_speaker(&caucus, "-H0000", TimerState::stopped(60)).unwrap();

        assert_eq!(next.speaking.as_ref().map(|s| s.who.as_str()), Some("France"));
        assert_eq!(next.queue.len(), 2);
        assert!(next.history.is_empty());
    }

    #[test]
    fn test_advance_sequence_is_fifo() {
        // The sequence of values assigned to `speaking` equals enqueue order
        let mut caucus = caucus_with_queue(&["France", "Ghana", "Chile"]);
        let mut floor = Vec::new();
        let mut n = 0;
        while !caucus.queue.is_empty() {
            caucus = advance_speaker(&caucus, &format!("-H{:04}", n), TimerState::stopped(60))
                .unwrap();
            floor.push(caucus.speaking.clone().unwrap().who);
            n += 1;
        }
        assert_eq!(floor, vec!["France", "Ghana", "Chile"]);
    }

    #[test]
    fn test_advance_moves_previous_speaker_to_history() {
        let caucus = caucus_with_queue(&["France", "Ghana"]);
        let after_one = advance_speaker(&caucus, "-H0000", TimerState::stopped(60)).unwrap();
        let after_two = advance_speaker(&after_one, "-H0001", TimerState::stopped(60)).unwrap();

        assert_eq!(after_two.speaking.as_ref().map(|s| s.who.as_str()), Some("Ghana"));
        assert_eq!(after_two.history.len(), 1);
        assert_eq!(after_two.history["-H0001"].who, "France");
    }

    #[test]
    fn test_advance_resets_speaker_timer() {
        let mut caucus = caucus_with_queue(&["France"]);
        caucus.speaker_timer = TimerState {
            elapsed: 55,
            remaining: 5,
            ticking: true,
        };
        let next = advance_speaker(&caucus, "-H0000", TimerState::stopped(90)).unwrap();
        assert_eq!(next.speaker_timer, TimerState::stopped(90));
    }

    #[test]
    fn test_advance_empty_queue_is_refused() {
        let caucus = CaucusState::open("Topic", 600, 60);
        assert_eq!(
            advance_speaker(&caucus, "-H0000", TimerState::stopped(60)),
            Err(DomainError::EmptyQueue)
        );
    }

    #[test]
    fn test_advance_does_not_mutate_input() {
        let caucus = caucus_with_queue(&["France", "Ghana"]);
        let before = caucus.clone();
        let _ = advance_speaker(&caucus, "-H0000", TimerState::stopped(60)).unwrap();
        assert_eq!(caucus, before);
    }
}
