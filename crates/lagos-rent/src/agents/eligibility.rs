use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AgentEligibilitySnapshot, SubscriptionStatus};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const GRACE_PERIOD_DAYS: i64 = 7;

/// Which rule of the permission chain decided the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "basis")]
pub enum ListingBasis {
    NotVerified,
    FreeWeeks { weeks: u32 },
    Trial { days_left: i64 },
    ActiveSubscription,
    Denied,
}

impl ListingBasis {
    pub const fn permits_listing(self) -> bool {
        matches!(
            self,
            Self::FreeWeeks { .. } | Self::Trial { .. } | Self::ActiveSubscription
        )
    }
}

/// Combined answer consumed by "create listing" gating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eligibility {
    pub can_list: bool,
    pub status_label: String,
    pub trial_days_remaining: u32,
}

/// Ordered short-circuit chain; the first matching rule wins.
pub fn listing_basis(snapshot: &AgentEligibilitySnapshot, now: DateTime<Utc>) -> ListingBasis {
    if !snapshot.verification_status.is_verified() {
        return ListingBasis::NotVerified;
    }

    if snapshot.free_listing_weeks > 0 {
        return ListingBasis::FreeWeeks {
            weeks: snapshot.free_listing_weeks,
        };
    }

    let Some(subscription) = &snapshot.subscription else {
        return ListingBasis::Denied;
    };

    if subscription.status == SubscriptionStatus::Trial && subscription.trial_window_contains(now)
    {
        if let Some(ends) = subscription.trial_ends_at {
            return ListingBasis::Trial {
                days_left: ceil_days((ends - now).num_milliseconds()),
            };
        }
    }

    if subscription.status == SubscriptionStatus::Active && subscription.period_covers(now) {
        return ListingBasis::ActiveSubscription;
    }

    ListingBasis::Denied
}

pub fn can_list(snapshot: &AgentEligibilitySnapshot, now: DateTime<Utc>) -> bool {
    listing_basis(snapshot, now).permits_listing()
}

pub fn status_label(snapshot: &AgentEligibilitySnapshot, now: DateTime<Utc>) -> String {
    match listing_basis(snapshot, now) {
        ListingBasis::NotVerified => "Not Verified".to_string(),
        ListingBasis::FreeWeeks { weeks } => format!("Free Weeks: {weeks}"),
        ListingBasis::Trial { days_left } => format!("Trial: {days_left} days left"),
        ListingBasis::ActiveSubscription => "Active Subscription".to_string(),
        ListingBasis::Denied => {
            if snapshot.subscription.is_none() {
                return "Subscription Required".to_string();
            }
            match grace_days_left(snapshot, now) {
                Some(days) => format!("Grace Period: {days} days left"),
                None => "Subscription Required".to_string(),
            }
        }
    }
}

/// Whole days until the trial ends, rounded up; 0 outside a trial.
pub fn trial_days_remaining(snapshot: &AgentEligibilitySnapshot, now: DateTime<Utc>) -> u32 {
    snapshot
        .subscription
        .as_ref()
        .filter(|subscription| subscription.status == SubscriptionStatus::Trial)
        .and_then(|subscription| subscription.trial_ends_at)
        .map(|ends| ceil_days((ends - now).num_milliseconds()).clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

pub fn evaluate(snapshot: &AgentEligibilitySnapshot, now: DateTime<Utc>) -> Eligibility {
    Eligibility {
        can_list: can_list(snapshot, now),
        status_label: status_label(snapshot, now),
        trial_days_remaining: trial_days_remaining(snapshot, now),
    }
}

fn grace_days_left(snapshot: &AgentEligibilitySnapshot, now: DateTime<Utc>) -> Option<i64> {
    let verified_at = snapshot.verified_at?;
    let days_since = (now - verified_at)
        .num_milliseconds()
        .div_euclid(DAY_MS)
        .max(0);
    (days_since < GRACE_PERIOD_DAYS).then_some(GRACE_PERIOD_DAYS - days_since)
}

fn ceil_days(millis: i64) -> i64 {
    let whole = millis.div_euclid(DAY_MS);
    if millis.rem_euclid(DAY_MS) == 0 {
        whole
    } else {
        whole + 1
    }
}
