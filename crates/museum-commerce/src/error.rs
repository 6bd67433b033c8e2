//! Commerce error types.

use museum_cache::CacheError;
use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Most user-facing failures never reach this type: corrupt storage reads
/// as an empty cart and unknown item ids are no-ops.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// A displayed price could not be turned into an amount.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// The volume discount table breaks its ordering or coverage rules.
    #[error("Invalid discount tier table: {0}")]
    InvalidTierTable(String),

    /// A pricing rate is outside its allowed range.
    #[error("Invalid rate for {name}: {value}")]
    InvalidRate { name: &'static str, value: String },

    /// An element the page contract guarantees is missing from the view.
    #[error("Required page element missing: #{0}")]
    MissingElement(&'static str),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Storage error.
    #[error("Storage error: {0}")]
    Cache(#[from] CacheError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
