//! Unified error type for the badge service.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP layer turns
//! these into responses through the `IntoResponse` impl in [`crate::http`].

use thiserror::Error;

/// All errors produced by the badge service.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The requested partner id does not resolve to a record
    #[error("Partner not found: {partner_id}")]
    PartnerNotFound {
        /// The id as it was requested
        partner_id: String,
    },

    /// A certification score outside the 0-100 range was supplied
    #[error("Invalid score: {score}")]
    InvalidScore {
        /// The rejected score
        score: f64,
    },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Badge payload could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure (config files, listener)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required environment variable missing or not unicode
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Bind address could not be parsed
    #[error("Invalid socket address: {0}")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl Error {
    /// Builds a [`Error::PartnerNotFound`] from anything displayable.
    pub fn partner_not_found(partner_id: impl ToString) -> Self {
        Self::PartnerNotFound {
            partner_id: partner_id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
