//! View derivation over the hierarchy overlay.
//!
//! Views are projections: the engine computes visibility and focus sets
//! from an immutable snapshot, and the rendering collaborator shows, hides,
//! or dims matching canvas elements. Nothing here mutates graph data.

pub mod drill;
pub mod focus;
