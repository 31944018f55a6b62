//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidSplit`] thrown when an expense cannot be divided as requested.
//! - [`UnknownMember`] / [`UnknownGroup`] thrown on referential integrity
//!   violations against the member/group directory.
//! - [`ArithmeticOverflow`] thrown when an amount or an accumulated balance
//!   leaves the representable range.
//!
//!  [`InvalidSplit`]: EngineError::InvalidSplit
//!  [`UnknownMember`]: EngineError::UnknownMember
//!  [`UnknownGroup`]: EngineError::UnknownGroup
//!  [`ArithmeticOverflow`]: EngineError::ArithmeticOverflow
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid split: {0}")]
    InvalidSplit(String),
    #[error("Unknown member: {0}")]
    UnknownMember(String),
    #[error("Unknown group: {0}")]
    UnknownGroup(String),
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidSplit(a), Self::InvalidSplit(b)) => a == b,
            (Self::UnknownMember(a), Self::UnknownMember(b)) => a == b,
            (Self::UnknownGroup(a), Self::UnknownGroup(b)) => a == b,
            (Self::ArithmeticOverflow(a), Self::ArithmeticOverflow(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            _ => false,
        }
    }
}
