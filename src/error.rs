//! Error taxonomy.
//!
//! Three kinds of failure exist, with very different blast radii:
//!
//! - [`EntryError`]: one 4-token group failed validation. Recovered
//!   inside the parser by skipping the group and logging a warning;
//!   never propagated to callers.
//! - [`StoreError::Initialization`]: a source file could not be read
//!   while building the store. Fatal to construction.
//! - [`StoreError::Csv`]: an append or reload failed during `save`.
//!   Surfaced to the caller; the in-memory snapshot is left unchanged.

use std::io;

use thiserror::Error;

/// Fatal repository failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The CSV sources could not be loaded at store construction.
    #[error("failed to load CSV files: {0}")]
    Initialization(#[source] io::Error),

    /// A save could not append or reload; the current snapshot stands.
    #[error("failed to save CSV entry: {0}")]
    Csv(#[source] io::Error),
}

/// A single record's 4-token group failed field validation.
///
/// These are always recovered locally: the parser skips the group,
/// logs the error at warning level, and moves on without consuming
/// a record id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// A numeric field held no digits, or more digits than fit.
    #[error("field {0:?} is not a number")]
    NotNumeric(String),

    /// The third field had no whitespace to split zipcode from city.
    #[error("field {0:?} has no city part")]
    MissingCity(String),

    /// The color code is outside the known 1-7 range.
    #[error("color code {0} does not exist")]
    UnknownColorCode(u32),
}
