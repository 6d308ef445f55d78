//! Respondent profiles and the profile provider seam.
//!
//! Age is derived from the birth date at query time, never stored — a
//! respondent who crosses an age-range boundary becomes eligible (or
//! ineligible) without any profile write.

use crate::{
    error::{CoreError, CoreResult},
    types::UserId,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondentProfile {
    pub gender: String,
    pub birth_date: NaiveDate,
    pub marital_status: String,
    pub city: String,
    pub education: String,
    pub profession: String,
    pub salary_band: String,
    pub interests: Vec<String>,
}

impl RespondentProfile {
    /// Age in whole years as of today.
    pub fn age(&self) -> u32 {
        self.age_on(Utc::now().date_naive())
    }

    /// Age in whole years on a given date.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut age = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}

/// External collaborator supplying already-authenticated respondent profiles.
pub trait ProfileProvider: Send {
    fn profile(&self, respondent_id: &str) -> CoreResult<RespondentProfile>;
}

/// Fixed in-memory provider used by tests and the demo runner.
#[derive(Debug, Default)]
pub struct StaticProfiles {
    profiles: HashMap<UserId, RespondentProfile>,
}

impl StaticProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, respondent_id: impl Into<UserId>, profile: RespondentProfile) {
        self.profiles.insert(respondent_id.into(), profile);
    }
}

impl ProfileProvider for StaticProfiles {
    fn profile(&self, respondent_id: &str) -> CoreResult<RespondentProfile> {
        self.profiles
            .get(respondent_id)
            .cloned()
            .ok_or_else(|| CoreError::ProfileNotFound(respondent_id.to_string()))
    }
}
