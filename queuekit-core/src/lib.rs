//! Shared types and traits for steady-state queueing models.
//!
//! This crate defines the vocabulary the model crates build on:
//!
//! - [`QueueModel`] and [`WaitTimeTail`]: the metric surface every model exposes
//! - [`Rates`]: arrival and service rates validated for positivity and stability
//! - [`ModelError`]: the invalid-argument errors raised by construction and queries
//! - [`Summary`]: a plain snapshot of a model's means
//! - [`constraint`]: numeric invariants checked once at construction time

pub mod combinatorics;
pub mod constraint;
mod error;
mod model;
mod rate;
mod summary;

pub use error::ModelError;
pub use model::{QueueModel, WaitTimeTail};
pub use rate::{Rate, Rates};
pub use summary::Summary;
