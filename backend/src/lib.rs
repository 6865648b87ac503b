//! Character photo studio backend.
//!
//! The crate follows a ports-and-adapters layout: [`domain`] owns entities,
//! services and port traits; [`inbound`] exposes them over HTTP; [`outbound`]
//! implements the driven ports against PostgreSQL, the local uploads tree and
//! Google's token endpoint.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

/// OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
