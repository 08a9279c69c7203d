//! Document store adapters
//!
//! [`memory::MemoryDocumentStore`] is a faithful in-process implementation
//! of the store port: path-tree storage, monotonic push keys, per-path
//! fan-out in commit order, and access rules that surface rejections
//! through the notification side-channel.

pub mod memory;
pub mod push_id;
pub mod rules;
