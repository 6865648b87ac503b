//! Actix middleware applied to the whole app.

pub mod trace;

pub use trace::{Trace, TraceService};
