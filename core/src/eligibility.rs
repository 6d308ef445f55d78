//! Eligibility resolver — which published surveys can a respondent complete
//! right now.
//!
//! Strictly read-only: composes lifecycle snapshots, the filter matcher, and
//! the ledger's completion set without touching any counter.

use crate::{
    error::CoreResult,
    ledger, matcher,
    profile::RespondentProfile,
    reward,
    store::Store,
    survey::{Survey, Visibility},
};
use serde::Serialize;

/// Why a published survey is not completable by this respondent. Already
/// having answered is distinct from failing the demographic filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IneligibilityReason {
    NotEligible,
    AlreadyCompleted,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailableSurvey {
    pub survey: Survey,
    /// Per-response payout, attached for display. Computing it has no side
    /// effects.
    pub unit_reward: f64,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
}

/// All published surveys partitioned by eligibility for one respondent,
/// newest first. A missing profile degrades private surveys to ineligible
/// instead of failing the whole listing.
pub fn list_available(
    store: &Store,
    respondent_id: &str,
    profile: Option<&RespondentProfile>,
) -> CoreResult<Vec<AvailableSurvey>> {
    let published = store.published_surveys()?;
    let completed = ledger::completed_survey_ids(store, respondent_id)?;

    let mut listing = Vec::with_capacity(published.len());
    for survey in published {
        let unit_reward = reward::unit_reward(survey.price, survey.total_responses);
        let (eligible, reason) = if completed.contains(&survey.survey_id) {
            (false, Some(IneligibilityReason::AlreadyCompleted))
        } else {
            let matched = match profile {
                Some(p) => matcher::survey_matches(&survey, p),
                None => survey.visibility == Visibility::Public,
            };
            if matched {
                (true, None)
            } else {
                (false, Some(IneligibilityReason::NotEligible))
            }
        };
        listing.push(AvailableSurvey {
            survey,
            unit_reward,
            eligible,
            reason,
        });
    }
    Ok(listing)
}
