//! Internal implementation details.

pub(crate) mod circular;

pub(crate) use circular::{with_circular_check, ResolutionPath, MAX_DEPTH};
