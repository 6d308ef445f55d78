//! Response ledger — the only path that mutates response counters and wallet
//! balances.
//!
//! A completion is one atomic unit: published-status gate, duplicate gate via
//! the unique index, capacity-guarded counter increment, response insert, and
//! wallet credit all commit together or roll back together (see
//! store/response.rs). A retried call after a transient failure either finds
//! its own earlier record (DuplicateCompletion) or re-runs cleanly — never a
//! double credit.

use crate::{
    error::{CoreError, CoreResult},
    store::Store,
    types::{ResponseId, SurveyId, UserId},
};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            other => Err(anyhow::anyhow!("unknown payment status '{other}'").into()),
        }
    }
}

/// One completed response. Immutable after creation — no edits, no
/// retraction. The reward amount is frozen at issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub response_id: ResponseId,
    pub survey_id: SurveyId,
    pub respondent_id: UserId,
    /// Answer payload, opaque to this core.
    pub payload: serde_json::Value,
    pub reward: f64,
    pub payment_status: PaymentStatus,
    pub completed_at: DateTime<Utc>,
}

/// Record a completion and credit the respondent's wallet.
pub fn record_completion(
    store: &Store,
    survey_id: &str,
    respondent_id: &str,
    payload: serde_json::Value,
) -> CoreResult<ResponseRecord> {
    let record = store.record_completion(survey_id, respondent_id, &payload)?;
    info!(
        "respondent {respondent_id} completed survey {survey_id}, reward {:.2}",
        record.reward
    );
    Ok(record)
}

/// Read back the payload a respondent already submitted for a survey.
pub fn completed_submission(
    store: &Store,
    survey_id: &str,
    respondent_id: &str,
) -> CoreResult<serde_json::Value> {
    let record = store
        .get_response(survey_id, respondent_id)?
        .ok_or_else(|| CoreError::NotFound {
            kind: "response",
            id: format!("{survey_id}/{respondent_id}"),
        })?;
    Ok(record.payload)
}

/// The set of surveys a respondent has already completed. Drives the
/// ALREADY_COMPLETED partition in the eligibility resolver.
pub fn completed_survey_ids(store: &Store, respondent_id: &str) -> CoreResult<HashSet<SurveyId>> {
    Ok(store.completed_survey_ids(respondent_id)?.into_iter().collect())
}

/// All responses collected for a survey, oldest first. Creator-side review.
pub fn responses_for_survey(store: &Store, survey_id: &str) -> CoreResult<Vec<ResponseRecord>> {
    store.responses_for_survey(survey_id)
}
