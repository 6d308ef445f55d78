//! Survey lifecycle — draft → published → finished.
//!
//! The only edges are: draft --publish(validated)--> published,
//! published --finish--> finished, and draft --delete--> (removed). Every
//! transition is a guarded conditional update keyed on the expected previous
//! status, so a racing double publish or double finish loses cleanly as
//! InvalidStateTransition instead of corrupting state.

use crate::{
    error::{CoreError, CoreResult},
    store::Store,
    survey::{DraftFields, Plan, Survey, SurveyStatus},
};
use chrono::Utc;
use log::info;
use uuid::Uuid;

/// Create a new draft owned by `owner_id`. Drafts are freely mutable and
/// carry no price or response target yet.
pub fn create(store: &Store, owner_id: &str, fields: DraftFields) -> CoreResult<Survey> {
    let now = Utc::now();
    let survey = Survey {
        survey_id: Uuid::new_v4().to_string(),
        owner_id: owner_id.to_string(),
        title: fields.title,
        description: fields.description,
        category: fields.category,
        visibility: fields.visibility,
        filter: fields.filter,
        questions: fields.questions,
        price: 0.0,
        total_responses: 0,
        responses_collected: 0,
        status: SurveyStatus::Draft,
        created_at: now,
        updated_at: now,
    };
    store.insert_survey(&survey)?;
    info!("survey {} created by {}", survey.survey_id, owner_id);
    Ok(survey)
}

/// Replace the draft fields of a survey. Allowed only while status = draft.
pub fn update(store: &Store, survey_id: &str, fields: DraftFields) -> CoreResult<Survey> {
    let changed = store.update_draft_fields(survey_id, &fields, Utc::now())?;
    if changed == 0 {
        return Err(not_in_expected_state(store, survey_id, SurveyStatus::Draft)?);
    }
    store.get_survey(survey_id)
}

/// Validate the draft and publish it, freezing price and response target
/// from the chosen plan tier. A failed publish leaves the draft untouched.
pub fn publish(store: &Store, survey_id: &str, plan: Plan) -> CoreResult<Survey> {
    let survey = store.get_survey(survey_id)?;
    validate_for_publish(&survey)?;

    let (price, total_responses) = plan.resolve()?;
    let changed = store.publish_survey(survey_id, price, total_responses, Utc::now())?;
    if changed == 0 {
        return Err(not_in_expected_state(store, survey_id, SurveyStatus::Draft)?);
    }

    info!(
        "survey {survey_id} published: price {price}, target {total_responses} responses"
    );
    store.get_survey(survey_id)
}

/// Close a published survey. Terminal, and deliberately not idempotent: a
/// second finish is an error (one explicit "finish" action per survey).
pub fn finish(store: &Store, survey_id: &str) -> CoreResult<Survey> {
    let changed = store.finish_survey(survey_id, Utc::now())?;
    if changed == 0 {
        return Err(not_in_expected_state(store, survey_id, SurveyStatus::Published)?);
    }
    info!("survey {survey_id} finished");
    store.get_survey(survey_id)
}

/// Remove a draft. Published and finished surveys cannot be deleted.
pub fn delete(store: &Store, survey_id: &str) -> CoreResult<()> {
    let changed = store.delete_draft(survey_id)?;
    if changed == 0 {
        return Err(not_in_expected_state(store, survey_id, SurveyStatus::Draft)?);
    }
    info!("draft survey {survey_id} deleted");
    Ok(())
}

/// A guarded update touched zero rows: either the survey does not exist, or
/// it sits in the wrong state. Re-read to report which.
fn not_in_expected_state(
    store: &Store,
    survey_id: &str,
    expected: SurveyStatus,
) -> CoreResult<CoreError> {
    let survey = store.get_survey(survey_id)?;
    Ok(CoreError::InvalidStateTransition {
        survey_id: survey_id.to_string(),
        status: survey.status.as_str().to_string(),
        expected: expected.as_str().to_string(),
    })
}

/// Publish-time validation: title and category present, every question has
/// text, and every choice-type question carries a complete option list.
fn validate_for_publish(survey: &Survey) -> CoreResult<()> {
    if survey.title.trim().is_empty() {
        return Err(CoreError::Validation("survey title is empty".into()));
    }
    if survey.category.trim().is_empty() {
        return Err(CoreError::Validation("no category selected".into()));
    }
    for (idx, question) in survey.questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "question {} has no text",
                idx + 1
            )));
        }
        if question.kind.has_options() {
            if question.options.is_empty() {
                return Err(CoreError::Validation(format!(
                    "question {} has no options",
                    idx + 1
                )));
            }
            if question.options.iter().any(|o| o.trim().is_empty()) {
                return Err(CoreError::Validation(format!(
                    "question {} has an empty option",
                    idx + 1
                )));
            }
        }
    }
    Ok(())
}
