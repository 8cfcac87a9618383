//! Agent-side rules: whether an agent may publish listings right now, the
//! status label shown next to the "create listing" action, and referral
//! reward bookkeeping.

pub mod domain;
pub mod eligibility;
pub mod referral;
pub mod router;


pub use domain::{AgentEligibilitySnapshot, Subscription, SubscriptionStatus, VerificationStatus};
pub use eligibility::{
    can_list, evaluate, listing_basis, status_label, trial_days_remaining, Eligibility,
    ListingBasis,
};
pub use referral::{
    extract_referral_code, is_valid_referral_code, referral_url, FreeListingCredits,
    ReferralRewards,
};
pub use router::{agent_router, EligibilityRequest};
