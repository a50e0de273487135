use serde::{Deserialize, Serialize};

use crate::{AppResult, NonEmptyString};

/// Caller performing an administrative operation, as identified by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    subject: NonEmptyString,
}

impl Actor {
    /// Creates an actor from the upstream subject claim.
    pub fn new(subject: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            subject: NonEmptyString::new(subject)?,
        })
    }

    /// Actor used for bootstrap work that no person initiated.
    #[must_use]
    pub fn system() -> Self {
        Self {
            subject: NonEmptyString("system".to_owned()),
        }
    }

    /// Returns the stable subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }
}
