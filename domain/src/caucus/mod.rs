//! Moderated caucus: topic, timers, speaker queue
//!
//! A moderated caucus owns two timers (whole-caucus and per-speaker) and an
//! insertion-ordered queue of pending speakers. The queue's only ordering
//! is store-key order; no re-ranking is ever applied to it.

pub mod entities;
pub mod transitions;
