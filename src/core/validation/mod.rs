//! Request validation
//!
//! Request bodies derive [`validator::Validate`]; the [`ValidatedJson`]
//! extractor turns parse failures and rule violations into
//! [`ValidationError`](crate::core::error::ValidationError)s before the
//! handler runs.

pub mod extractor;

pub use extractor::ValidatedJson;
