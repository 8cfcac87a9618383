use axum::{
    extract::Query,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::AgentEligibilitySnapshot;
use super::eligibility::{evaluate, Eligibility};
use super::referral::ReferralRewards;

/// Agent profile fields plus an optional evaluation instant; `now` defaults
/// to the server clock.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    #[serde(flatten)]
    pub agent: AgentEligibilitySnapshot,
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferralRewardsQuery {
    #[serde(default)]
    pub count: u32,
}

pub fn agent_router() -> Router {
    Router::new()
        .route("/api/v1/agents/eligibility", post(eligibility_handler))
        .route("/api/v1/agents/referral-rewards", get(referral_rewards_handler))
}

pub(crate) async fn eligibility_handler(
    Json(request): Json<EligibilityRequest>,
) -> Json<Eligibility> {
    let now = request.now.unwrap_or_else(Utc::now);
    Json(evaluate(&request.agent, now))
}

pub(crate) async fn referral_rewards_handler(
    Query(query): Query<ReferralRewardsQuery>,
) -> Json<ReferralRewards> {
    Json(ReferralRewards::for_count(query.count))
}
