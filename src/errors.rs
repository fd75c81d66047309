//! Error types for the strategy core.
//!
//! Three failure classes exist and they are kept as separate types so that one
//! can never be converted into another by accident:
//!
//! - [`BadData`]: recoverable. Returned by `from_basic` and the binary codec when
//!   stored data does not decode. Replay code discards the example and moves on.
//! - [`TypeMismatch`]: a caller handed a strategy a template or parameter it could
//!   not have produced. This is a programming error and takes the abort path.
//! - [`ResolutionError`]: the strategy table could not turn a descriptor into a
//!   strategy. A setup defect, surfaced to the harness as an error value.

use crate::basic::{BasicData, BasicKind};

/// Result type for decoding externally sourced data
pub type DecodeResult<T> = Result<T, BadData>;

/// Stored data that does not match what a strategy can decode
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BadData {
    #[error("Expected data of type {expected} but got {found}")]
    UnexpectedShape { expected: BasicKind, found: BasicData },

    #[error("Expected {expected} but got {found}")]
    UnexpectedValue { expected: String, found: BasicData },

    #[error("Index out of range: {index} not in [0, {len})")]
    IndexOutOfRange { index: i128, len: usize },

    #[error("Malformed basic data: {0}")]
    Malformed(String),
}

/// A template or parameter of a foreign shape was passed to a strategy
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{strategy} expected {expected} but got {found}")]
pub struct TypeMismatch {
    pub strategy: &'static str,
    pub expected: &'static str,
    pub found: String,
}

impl TypeMismatch {
    pub fn new(
        strategy: &'static str,
        expected: &'static str,
        found: impl std::fmt::Debug,
    ) -> Self {
        Self {
            strategy,
            expected,
            found: format!("{:?}", found),
        }
    }

    /// Abort the current generation.
    ///
    /// Shape violations are never recoverable, so this does not return.
    #[track_caller]
    pub fn abort(self) -> ! {
        log::error!("[STRATEGY] {}", self);
        panic!("TypeMismatch: {}", self)
    }
}

/// Failure to obtain a strategy for a descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("No strategy available for {descriptor}")]
    NoStrategyFor { descriptor: String },

    #[error("Invalid descriptor {descriptor}: {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },
}

/// Require `data` to be of the given basic kind.
pub fn check_data_type(expected: BasicKind, data: &BasicData) -> DecodeResult<()> {
    if data.kind() == expected {
        Ok(())
    } else {
        Err(BadData::UnexpectedShape {
            expected,
            found: data.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_data_type_accepts_matching_kind() {
        assert_eq!(check_data_type(BasicKind::Integer, &BasicData::Integer(3)), Ok(()));
        assert_eq!(check_data_type(BasicKind::Null, &BasicData::Null), Ok(()));
    }

    #[test]
    fn check_data_type_reports_what_it_found() {
        let err = check_data_type(BasicKind::Integer, &BasicData::Sequence(vec![BasicData::Null]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Expected data of type integer but got [null]");
    }

    #[test]
    fn index_error_message() {
        let err = BadData::IndexOutOfRange { index: 3, len: 3 };
        assert_eq!(err.to_string(), "Index out of range: 3 not in [0, 3)");
    }

    #[test]
    #[should_panic(expected = "TypeMismatch: BoolStrategy expected a boolean template")]
    fn abort_panics_with_message() {
        TypeMismatch::new("BoolStrategy", "a boolean template", 7).abort();
    }
}
