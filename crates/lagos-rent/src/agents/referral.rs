use serde::{Deserialize, Serialize};
use url::Url;

const MILESTONE_STEP: u32 = 5;
const REFERRAL_PARAM: &str = "ref";

/// Referral progress shown on the agent dashboard. One free listing is earned
/// per referral; milestones come every five referrals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralRewards {
    pub free_listings: u32,
    pub next_milestone: u32,
    pub progress_pct: f32,
}

impl ReferralRewards {
    pub fn for_count(referral_count: u32) -> Self {
        let next_milestone =
            referral_count.saturating_add(1).div_ceil(MILESTONE_STEP) * MILESTONE_STEP;
        let progress_pct =
            (referral_count % MILESTONE_STEP) as f32 / MILESTONE_STEP as f32 * 100.0;

        Self {
            free_listings: referral_count,
            next_milestone,
            progress_pct,
        }
    }
}

/// Free listings earned through referrals versus those already spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeListingCredits {
    pub earned: u32,
    pub used: u32,
}

impl FreeListingCredits {
    pub fn remaining(self) -> u32 {
        self.earned.saturating_sub(self.used)
    }

    /// Spends one credit, or returns `None` when nothing is left.
    pub fn consume(self) -> Option<Self> {
        (self.remaining() > 0).then_some(Self {
            used: self.used + 1,
            ..self
        })
    }
}

/// Referral codes are twelve upper-case alphanumerics.
pub fn is_valid_referral_code(code: &str) -> bool {
    code.len() == 12
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

pub fn referral_url(base: &Url, code: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair(REFERRAL_PARAM, code);
    url
}

/// Pulls the `ref` parameter out of a landing URL; malformed URLs yield `None`.
pub fn extract_referral_code(raw_url: &str) -> Option<String> {
    let url = Url::parse(raw_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == REFERRAL_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
