//! Platform facade — wires the store, the profile provider, and the domain
//! modules into the surface presentation callers use.
//!
//! Callers are independent request/response clients; every operation here
//! completes or fails synchronously. Wallet balances are read fresh per call,
//! never cached in component state.

use crate::{
    eligibility::{self, AvailableSurvey},
    error::{CoreError, CoreResult},
    ledger::{self, ResponseRecord},
    lifecycle,
    profile::ProfileProvider,
    store::Store,
    survey::{DraftFields, Plan, Survey},
};

pub struct SurveyPlatform {
    store: Store,
    profiles: Box<dyn ProfileProvider>,
}

impl SurveyPlatform {
    /// Open (or create) a file-backed platform and apply migrations.
    pub fn open(path: &str, profiles: Box<dyn ProfileProvider>) -> CoreResult<Self> {
        let store = Store::open(path)?;
        store.migrate()?;
        Ok(Self { store, profiles })
    }

    /// In-memory platform, used in tests.
    pub fn in_memory(profiles: Box<dyn ProfileProvider>) -> CoreResult<Self> {
        let store = Store::in_memory()?;
        store.migrate()?;
        Ok(Self { store, profiles })
    }

    // ── Creator surface ────────────────────────────────────────

    pub fn create_survey(&self, owner_id: &str, fields: DraftFields) -> CoreResult<Survey> {
        lifecycle::create(&self.store, owner_id, fields)
    }

    pub fn update_survey(&self, survey_id: &str, fields: DraftFields) -> CoreResult<Survey> {
        lifecycle::update(&self.store, survey_id, fields)
    }

    pub fn publish_survey(&self, survey_id: &str, plan: Plan) -> CoreResult<Survey> {
        lifecycle::publish(&self.store, survey_id, plan)
    }

    pub fn finish_survey(&self, survey_id: &str) -> CoreResult<Survey> {
        lifecycle::finish(&self.store, survey_id)
    }

    pub fn delete_survey(&self, survey_id: &str) -> CoreResult<()> {
        lifecycle::delete(&self.store, survey_id)
    }

    pub fn survey(&self, survey_id: &str) -> CoreResult<Survey> {
        self.store.get_survey(survey_id)
    }

    pub fn surveys_by_owner(&self, owner_id: &str) -> CoreResult<Vec<Survey>> {
        self.store.surveys_by_owner(owner_id)
    }

    /// Creator-side review of everything collected for a survey.
    pub fn responses_for_survey(&self, survey_id: &str) -> CoreResult<Vec<ResponseRecord>> {
        ledger::responses_for_survey(&self.store, survey_id)
    }

    // ── Respondent surface ─────────────────────────────────────

    /// Published surveys partitioned by eligibility for this respondent,
    /// newest first. Read-only. A respondent without a profile still sees
    /// public surveys; private ones degrade to ineligible.
    pub fn list_available(&self, respondent_id: &str) -> CoreResult<Vec<AvailableSurvey>> {
        let profile = match self.profiles.profile(respondent_id) {
            Ok(p) => Some(p),
            Err(CoreError::ProfileNotFound(_)) => None,
            Err(e) => return Err(e),
        };
        eligibility::list_available(&self.store, respondent_id, profile.as_ref())
    }

    /// Submit a completed response: records it, bumps the survey counter, and
    /// credits the respondent's wallet — atomically, exactly once.
    pub fn submit_response(
        &self,
        survey_id: &str,
        respondent_id: &str,
        payload: serde_json::Value,
    ) -> CoreResult<ResponseRecord> {
        ledger::record_completion(&self.store, survey_id, respondent_id, payload)
    }

    /// Read back an already-submitted response payload.
    pub fn completed_submission(
        &self,
        survey_id: &str,
        respondent_id: &str,
    ) -> CoreResult<serde_json::Value> {
        ledger::completed_submission(&self.store, survey_id, respondent_id)
    }

    /// Current wallet balance, zero for accounts never credited.
    pub fn wallet_balance(&self, owner_id: &str) -> CoreResult<f64> {
        self.store.wallet_balance(owner_id)
    }
}
