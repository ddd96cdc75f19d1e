use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure anywhere in the remote insight chain.
///
/// Never surfaced by [`crate::InsightClient`]; it is folded into
/// [`InsightOutcome::Degraded`] at the boundary of each insight call.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API credential configured. Raised before any network attempt.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The HTTP exchange failed or returned a non-success status.
    ///
    /// `status` is `None` when no response was received at all.
    #[error("transport error (status: {status:?}): {body}")]
    Transport { status: Option<u16>, body: String },

    /// The success envelope did not carry the expected text payload.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The model's text could not be read as the requested insight shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl AiError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn reason(&self) -> DegradedReason {
        match self {
            AiError::Configuration(_) => DegradedReason::Configuration,
            AiError::Transport { .. } => DegradedReason::Transport,
            AiError::Protocol(_) => DegradedReason::Protocol,
            AiError::Parse(_) => DegradedReason::Parse,
        }
    }
}

/// Why an insight fell back to static/local content.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradedReason {
    Configuration,
    Transport,
    Protocol,
    Parse,
}

impl core::fmt::Display for DegradedReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            DegradedReason::Configuration => "configuration",
            DegradedReason::Transport => "transport",
            DegradedReason::Protocol => "protocol",
            DegradedReason::Parse => "parse",
        };
        f.write_str(s)
    }
}

/// Result of one insight call: always carries a value of the expected shape.
///
/// `Live` holds what the model produced; `Degraded` holds the fallback payload
/// and the reason the remote chain failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InsightOutcome<T> {
    Live {
        value: T,
    },
    #[serde(rename = "fallback")]
    Degraded {
        reason: DegradedReason,
        value: T,
    },
}

impl<T> InsightOutcome<T> {
    pub fn live(value: T) -> Self {
        Self::Live { value }
    }

    pub fn degraded(value: T, reason: DegradedReason) -> Self {
        Self::Degraded { reason, value }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Live { value } | Self::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Live { value } | Self::Degraded { value, .. } => value,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    pub fn reason(&self) -> Option<DegradedReason> {
        match self {
            Self::Live { .. } => None,
            Self::Degraded { reason, .. } => Some(*reason),
        }
    }
}
