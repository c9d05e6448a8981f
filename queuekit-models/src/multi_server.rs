//! Models with several identical servers in parallel.

mod unbounded;

pub use unbounded::MultiServerUnbounded;
