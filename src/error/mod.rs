//! Error types for the GlassFrog client.
//!
//! Every fallible operation returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## Taxonomy
//!
//! | Kind                         | Origin                                   | Retried |
//! |------------------------------|------------------------------------------|---------|
//! | [`ErrorKind::DataFormat`]    | malformed record, detected at access     | never   |
//! | [`ErrorKind::Unsupported`]   | fetch on a link-only resource            | never   |
//! | [`ErrorKind::NotFound`]      | server answered 404                      | never   |
//! | [`ErrorKind::Configuration`] | missing token, bad base URL              | never   |
//! | transport kinds              | any other gateway failure                | by the gateway only |
//!
//! The resolution engine recovers from exactly one of these: resolving a
//! reference to a link-only resource swallows [`ErrorKind::Unsupported`] and
//! builds the entity locally. Everything else reaches the caller unchanged.
//!
//! ```rust
//! use glassfrog::{Error, ErrorKind};
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err.kind() {
//!         ErrorKind::NotFound => "no such record",
//!         ErrorKind::DataFormat => "unexpected payload",
//!         kind if kind.is_transport() => "network trouble",
//!         _ => "other",
//!     }
//! }
//!
//! assert_eq!(describe(&Error::not_found("role 7")), "no such record");
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for GlassFrog operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
