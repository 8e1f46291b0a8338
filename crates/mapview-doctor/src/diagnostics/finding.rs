//! Diagnostic findings
//!
//! A finding is the structured outcome of a single environment check.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Finding severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FindingKind {
    /// The map view cannot render at all
    CriticalError,
    /// A degraded but recoverable condition
    Error,
    /// The check passed
    Success,
}

impl FindingKind {
    /// Whether the remediation pass should annotate findings of this kind
    pub fn is_failure(&self) -> bool {
        matches!(self, FindingKind::CriticalError | FindingKind::Error)
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::CriticalError => write!(f, "critical"),
            FindingKind::Error => write!(f, "error"),
            FindingKind::Success => write!(f, "success"),
        }
    }
}

/// Component a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    /// WebGL drawing context acquisition
    GraphicsContext,
    /// Texture / image resource loading
    TextureLoad,
    /// Backend status endpoint reachability
    Backend,
}

impl Component {
    pub const ALL: [Component; 3] = [
        Component::GraphicsContext,
        Component::TextureLoad,
        Component::Backend,
    ];
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::GraphicsContext => write!(f, "Graphics context"),
            Component::TextureLoad => write!(f, "Texture load"),
            Component::Backend => write!(f, "Backend"),
        }
    }
}

/// Diagnostic finding
///
/// `remedy` is only ever present on failure kinds and `action_taken` is only
/// set by the remediation pass, which returns new values instead of mutating.
/// Deserialization enforces the same rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    kind: FindingKind,
    component: Component,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    remedy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_taken: Option<String>,
}

/// Wire form of a finding, checked before it becomes a [`Finding`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindingRecord {
    kind: FindingKind,
    component: Component,
    message: String,
    #[serde(default)]
    remedy: Option<String>,
    #[serde(default)]
    cause: Option<String>,
    #[serde(default)]
    action_taken: Option<String>,
}

#[derive(Debug, Error)]
enum InvalidFinding {
    #[error("successful {0} finding must not carry a remedy")]
    RemedyOnSuccess(Component),
    #[error("successful {0} finding must not carry a remediation action")]
    ActionOnSuccess(Component),
}

impl FindingRecord {
    fn into_finding(self) -> Result<Finding, InvalidFinding> {
        if !self.kind.is_failure() {
            if self.remedy.is_some() {
                return Err(InvalidFinding::RemedyOnSuccess(self.component));
            }
            if self.action_taken.is_some() {
                return Err(InvalidFinding::ActionOnSuccess(self.component));
            }
        }
        Ok(Finding {
            kind: self.kind,
            component: self.component,
            message: self.message,
            remedy: self.remedy,
            cause: self.cause,
            action_taken: self.action_taken,
        })
    }
}

impl<'de> Deserialize<'de> for Finding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        FindingRecord::deserialize(deserializer)?
            .into_finding()
            .map_err(de::Error::custom)
    }
}

impl Finding {
    fn new(kind: FindingKind, component: Component, message: impl Into<String>) -> Self {
        Self {
            kind,
            component,
            message: message.into(),
            remedy: None,
            cause: None,
            action_taken: None,
        }
    }

    /// Create a successful finding
    pub fn success(component: Component, message: impl Into<String>) -> Self {
        Self::new(FindingKind::Success, component, message)
    }

    /// Create an error finding
    pub fn error(component: Component, message: impl Into<String>) -> Self {
        Self::new(FindingKind::Error, component, message)
    }

    /// Create a critical error finding
    pub fn critical(component: Component, message: impl Into<String>) -> Self {
        Self::new(FindingKind::CriticalError, component, message)
    }

    /// Attach a suggested fix. Ignored on successful findings.
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        if self.kind.is_failure() {
            self.remedy = Some(remedy.into());
        }
        self
    }

    /// Attach the underlying failure detail
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    pub(crate) fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action_taken = Some(action.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.kind == FindingKind::Success
    }

    pub fn kind(&self) -> FindingKind {
        self.kind
    }

    pub fn component(&self) -> Component {
        self.component
    }

    /// Human readable description
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Suggested fix, failures only
    pub fn remedy(&self) -> Option<&str> {
        self.remedy.as_deref()
    }

    /// Underlying failure detail
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Strategy recorded by the remediation pass
    pub fn action_taken(&self) -> Option<&str> {
        self.action_taken.as_deref()
    }
}
