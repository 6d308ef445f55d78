//! Survey domain model — statuses, questions, targeting filters, plan tiers.
//!
//! Price and response target are frozen from the chosen plan tier at publish
//! time and never recomputed afterwards; the reward calculator operates only
//! on those two frozen fields.

use crate::{
    error::{CoreError, CoreResult},
    types::{SurveyId, UserId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Status and visibility ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Draft,
    Published,
    Finished,
}

impl SurveyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Published => "published",
            SurveyStatus::Finished => "finished",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "draft" => Ok(SurveyStatus::Draft),
            "published" => Ok(SurveyStatus::Published),
            "finished" => Ok(SurveyStatus::Finished),
            other => Err(anyhow::anyhow!("unknown survey status '{other}'").into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }

    pub fn parse(s: &str) -> CoreResult<Self> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(anyhow::anyhow!("unknown visibility '{other}'").into()),
        }
    }
}

// ── Questions ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    ShortText,
    Paragraph,
    MultipleChoice,
    Checkbox,
    Dropdown,
}

impl QuestionKind {
    /// Choice-type questions must carry a complete option list to publish.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            QuestionKind::MultipleChoice | QuestionKind::Checkbox | QuestionKind::Dropdown
        )
    }
}

/// One survey question. Options are an ordered sequence; order is meaningful
/// to respondents and must survive serialization untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Question {
    pub fn text_only(kind: QuestionKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            options: Vec::new(),
        }
    }

    pub fn with_options(
        kind: QuestionKind,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            options,
        }
    }
}

// ── Demographic filter ──────────────────────────────────────────────────

/// Creator-specified targeting predicate for private surveys.
///
/// Every field is independently optional: `None` means "no constraint" and
/// is distinct from an explicit empty value, so absent fields must stay
/// absent through serialization. Salary band and interest tags are collected
/// but not evaluated by the matcher (partial rollout, see matcher.rs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemographicFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Inclusive "min-max" age range, e.g. "25-34".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_band: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

impl DemographicFilter {
    pub fn is_empty(&self) -> bool {
        self.gender.is_none()
            && self.age_range.is_none()
            && self.marital_status.is_none()
            && self.city.is_none()
            && self.education.is_none()
            && self.profession.is_none()
            && self.salary_band.is_none()
            && self.interests.is_none()
    }
}

// ── Survey ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: SurveyId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<DemographicFilter>,
    pub questions: Vec<Question>,
    /// Total budget, frozen at publish time.
    pub price: f64,
    /// Response target, frozen at publish time.
    pub total_responses: u32,
    pub responses_collected: u32,
    pub status: SurveyStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The creator-editable fields of a draft. Used for both create and update;
/// price, response target, status, and counters are never part of it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftFields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<DemographicFilter>,
    pub questions: Vec<Question>,
}

// ── Plan catalog ────────────────────────────────────────────────────────

/// The closed catalog of publish-time plan tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Basic,
    Standard,
    Premium,
    Custom { responses: u32 },
}

impl Plan {
    pub const CUSTOM_MIN_RESPONSES: u32 = 10;
    pub const CUSTOM_MAX_RESPONSES: u32 = 10_000;

    /// Resolve the tier into its (price, response target) pair, the two
    /// fields frozen onto the survey at publish time.
    pub fn resolve(&self) -> CoreResult<(f64, u32)> {
        match *self {
            Plan::Basic => Ok((300.0, 100)),
            Plan::Standard => Ok((750.0, 300)),
            Plan::Premium => Ok((2000.0, 1000)),
            Plan::Custom { responses } => {
                if !(Self::CUSTOM_MIN_RESPONSES..=Self::CUSTOM_MAX_RESPONSES)
                    .contains(&responses)
                {
                    return Err(CoreError::Validation(format!(
                        "custom plan responses must be between {} and {}, got {responses}",
                        Self::CUSTOM_MIN_RESPONSES,
                        Self::CUSTOM_MAX_RESPONSES
                    )));
                }
                Ok((f64::from(responses) * 2.0, responses))
            }
        }
    }

    /// Look up a tier by its catalog id. Custom requires a response count.
    pub fn from_id(plan_id: &str, custom_responses: Option<u32>) -> CoreResult<Self> {
        match plan_id {
            "basic" => Ok(Plan::Basic),
            "standard" => Ok(Plan::Standard),
            "premium" => Ok(Plan::Premium),
            "custom" => {
                let responses = custom_responses.ok_or_else(|| {
                    CoreError::Validation("custom plan requires a response count".into())
                })?;
                Ok(Plan::Custom { responses })
            }
            other => Err(CoreError::Validation(format!("unknown plan '{other}'"))),
        }
    }
}
