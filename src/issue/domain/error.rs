//! Error types for issue validation and parsing.

use thiserror::Error;

/// Errors returned while constructing or editing issues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueDomainError {
    /// The title is empty after trimming.
    #[error("issue title must not be empty")]
    EmptyTitle,

    /// The title exceeds the 200-character limit.
    #[error("issue title exceeds 200 character limit")]
    TitleTooLong,

    /// A candidate solution is empty after trimming.
    #[error("solution must not be empty")]
    EmptySolution,

    /// The solution index does not address a recorded solution.
    #[error("solution index {index} is out of range for {len} solutions")]
    SolutionIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of recorded solutions.
        len: usize,
    },
}

/// Error returned while parsing an issue status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue status: {0}")]
pub struct ParseIssueStatusError(pub String);
