#![forbid(unsafe_code)]

use thiserror::Error;

use crate::grabber::{ConsumeError, GrabberId};

pub type Result<T> = std::result::Result<T, GripError>;

#[derive(Debug, Error)]
pub enum GripError {
    #[error("grabber {grabber} failed to consume action: {source}")]
    Consume {
        grabber: GrabberId,
        #[source]
        source: ConsumeError,
    },

    #[error("branch already exists: {name}")]
    DuplicateBranch { name: String },
}

impl GripError {
    #[must_use]
    pub fn consume(grabber: GrabberId, source: ConsumeError) -> Self {
        Self::Consume { grabber, source }
    }

    #[must_use]
    pub fn duplicate_branch(name: impl Into<String>) -> Self {
        Self::DuplicateBranch { name: name.into() }
    }

    /// The grabber whose hook failed, if any.
    #[must_use]
    pub fn grabber(&self) -> Option<GrabberId> {
        match self {
            Self::Consume { grabber, .. } => Some(*grabber),
            Self::DuplicateBranch { .. } => None,
        }
    }
}
