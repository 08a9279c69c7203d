//! Shared countdown timer
//!
//! A timer is a value in the shared document store, advanced by whichever
//! connected client holds a ticking view of it. All transitions here are
//! pure; the application layer decides when to write the result back.

pub mod display;
pub mod entities;
