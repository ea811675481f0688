use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Stored Discord IDs (channels, messages, users, roles) are kept as
    /// strings and must parse back to `u64` before use against the API.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A mission parameter required at this stage was not populated.
    ///
    /// The validation pipeline guarantees resolved fields before the
    /// orchestrator runs; hitting this means a step was skipped.
    #[error("Mission parameter '{field}' missing at {stage}")]
    MissingParam {
        /// The absent field
        field: &'static str,
        /// The lifecycle stage that needed it
        stage: &'static str,
    },
}
