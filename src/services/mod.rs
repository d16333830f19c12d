//! Ownership-scoped access to courses and exams.
//!
//! Every single-resource operation resolves the owning user through
//! [`ownership::ensure_owned`] before reading or writing. Writes run in one
//! transaction with the target row locked, so a concurrent delete surfaces as
//! [`ServiceError::NotFound`] instead of a resurrected row.

pub(crate) mod courses;
pub(crate) mod errors;
pub(crate) mod exams;
pub(crate) mod ownership;
pub(crate) mod validation;

pub(crate) use errors::ServiceError;
