//! Document status state machine and the other domain enums.
//!
//! All enums are stored as lowercase TEXT columns and serialized as
//! lowercase strings, so each one carries `FromStr`/`Display` plus a
//! `TryFrom<String>` impl for `sqlx(try_from)` in the db crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Status of a registered document.
///
/// `Found` is declared in the schema but no operation ever transitions a
/// document into it; it is kept for forward compatibility with a future
/// claim/match flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Active,
    Lost,
    Found,
}

impl DocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Active => "active",
            DocumentStatus::Lost => "lost",
            DocumentStatus::Found => "found",
        }
    }

    /// Whether `self -> to` is a legal transition.
    ///
    /// Legal transitions are `active -> lost` (reporting a document lost)
    /// and `lost -> active` (the owner recovered it). Nothing transitions
    /// into or out of `found`.
    pub fn can_transition(self, to: DocumentStatus) -> bool {
        matches!(
            (self, to),
            (DocumentStatus::Active, DocumentStatus::Lost)
                | (DocumentStatus::Lost, DocumentStatus::Active)
        )
    }

    /// Validate `self -> to`, returning a [`CoreError::Conflict`] naming
    /// both states when the transition is illegal.
    pub fn check_transition(self, to: DocumentStatus) -> Result<(), CoreError> {
        if self == to || self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "illegal document status transition: {self} -> {to}"
            )))
        }
    }
}

/// Validate a status patch coming from a plain document update.
///
/// The `active -> lost` transition is owned by the lost-report operation,
/// which also writes the report row; a direct patch to `lost` would bypass
/// it and desync the two tables, so it is rejected outright.
pub fn validate_status_patch(
    current: DocumentStatus,
    requested: Option<DocumentStatus>,
) -> Result<(), CoreError> {
    let Some(next) = requested else {
        return Ok(());
    };
    if next == DocumentStatus::Lost && current != DocumentStatus::Lost {
        return Err(CoreError::Validation(
            "documents are reported lost through the lost-report operation, not a status patch"
                .to_string(),
        ));
    }
    current.check_transition(next)
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(DocumentStatus::Active),
            "lost" => Ok(DocumentStatus::Lost),
            "found" => Ok(DocumentStatus::Found),
            other => Err(CoreError::Validation(format!(
                "unknown document status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for DocumentStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Status of a found-document report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoundDocumentStatus {
    Pending,
    Claimed,
    Unclaimed,
}

impl FoundDocumentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FoundDocumentStatus::Pending => "pending",
            FoundDocumentStatus::Claimed => "claimed",
            FoundDocumentStatus::Unclaimed => "unclaimed",
        }
    }
}

impl fmt::Display for FoundDocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoundDocumentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FoundDocumentStatus::Pending),
            "claimed" => Ok(FoundDocumentStatus::Claimed),
            "unclaimed" => Ok(FoundDocumentStatus::Unclaimed),
            other => Err(CoreError::Validation(format!(
                "unknown found document status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for FoundDocumentStatus {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Subscription tier on a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Free,
    Monthly,
    Yearly,
}

impl SubscriptionPlan {
    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Yearly => "yearly",
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(SubscriptionPlan::Free),
            "monthly" => Ok(SubscriptionPlan::Monthly),
            "yearly" => Ok(SubscriptionPlan::Yearly),
            other => Err(CoreError::Validation(format!(
                "unknown subscription plan: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for SubscriptionPlan {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
