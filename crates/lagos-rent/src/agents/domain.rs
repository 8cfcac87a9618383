use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VerificationStatus {
    Verified,
    Pending,
    Rejected,
    NotVerified,
    Unrecognized(String),
}

impl VerificationStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "verified" => Self::Verified,
            "pending" => Self::Pending,
            "rejected" => Self::Rejected,
            "not_verified" => Self::NotVerified,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Verified => "verified",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::NotVerified => "not_verified",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl Default for VerificationStatus {
    fn default() -> Self {
        Self::NotVerified
    }
}

impl From<String> for VerificationStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<VerificationStatus> for String {
    fn from(value: VerificationStatus) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionStatus {
    Trial,
    Active,
    Expired,
    None,
    Unrecognized(String),
}

impl SubscriptionStatus {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "trial" => Self::Trial,
            "active" => Self::Active,
            "expired" => Self::Expired,
            "none" | "" => Self::None,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Trial => "trial",
            Self::Active => "active",
            Self::Expired => "expired",
            Self::None => "none",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl Default for SubscriptionStatus {
    fn default() -> Self {
        Self::None
    }
}

impl From<String> for SubscriptionStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<SubscriptionStatus> for String {
    fn from(value: SubscriptionStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Subscription block of an agent profile. Window bounds are optional
/// because the backend omits them for agents who never started a trial.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Subscription {
    pub status: SubscriptionStatus,
    pub trial_starts_at: Option<DateTime<Utc>>,
    pub trial_ends_at: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub plan: Option<String>,
}

impl Subscription {
    /// Inclusive on both ends; a missing bound means no trial window.
    pub fn trial_window_contains(&self, now: DateTime<Utc>) -> bool {
        match (self.trial_starts_at, self.trial_ends_at) {
            (Some(starts), Some(ends)) => starts <= now && now <= ends,
            _ => false,
        }
    }

    pub fn period_covers(&self, now: DateTime<Utc>) -> bool {
        self.current_period_end
            .map(|period_end| now <= period_end)
            .unwrap_or(false)
    }
}

/// Point-in-time view of the fields that decide listing permission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentEligibilitySnapshot {
    pub verification_status: VerificationStatus,
    pub free_listing_weeks: u32,
    pub subscription: Option<Subscription>,
    pub verified_at: Option<DateTime<Utc>>,
}
