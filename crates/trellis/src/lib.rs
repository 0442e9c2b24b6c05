//! Trellis - dual-graph consistency and view-derivation engine.
//!
//! A project graph carries two edge overlays on one node set: hierarchical
//! edges form the outline tree, and dependency edges form an arbitrary
//! directed graph of precedence constraints between task nodes. This crate
//! keeps the two overlays consistent under client-optimistic editing and
//! derives views from the hierarchy overlay:
//!
//! - [`classify`] resolves an edge's kind from its metadata;
//! - [`validate`] gatekeeps dependency-edge creation (self-loops, endpoint
//!   eligibility, acyclicity) with human-readable rejection reasons;
//! - [`cycle`] detects whether a candidate edge would close a loop;
//! - [`hierarchy`] answers parent/children/sibling queries;
//! - [`view`] computes drill-down visibility and focus-mode dimming sets.
//!
//! Everything is pure and synchronous over an immutable [`snapshot`]: the
//! same module serves the client's optimistic pre-flight check and the
//! server's authoritative commit-time check, so the two sides cannot drift.

#![forbid(unsafe_code)]

pub mod classify;
pub mod cycle;
pub mod domain;
pub mod error;
pub mod hierarchy;
pub mod snapshot;
pub mod validate;
pub mod view;

pub use error::{Error, Result};
