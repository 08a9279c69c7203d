//! Projection port: primary view → presentation display
//!
//! The session controller pushes [`PresentationSnapshot`]s through this
//! port; the presentation layer's bridge fans them out to the secondary
//! window, if one is open. Delivery is best-effort by design — with no
//! window open, snapshots are dropped, not buffered.

use gavel_domain::PresentationSnapshot;

/// Output port carrying presentation snapshots out of the application layer
pub trait ProjectionSink: Send + Sync {
    fn project(&self, snapshot: PresentationSnapshot);
}

/// No-op implementation for tests and windowless runs
pub struct NoProjection;

impl ProjectionSink for NoProjection {
    fn project(&self, _snapshot: PresentationSnapshot) {}
}
