//! Shared primitives for the pea editing-analysis workspace.
//!
//! `pea-core` is the foundation the other pea crates build on:
//!
//! - **Error types**: [`PeaError`] and [`Result`] for structured error handling
//! - **Traits**: small contracts like [`Scored`] and [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{PeaError, Result};
pub use traits::*;
