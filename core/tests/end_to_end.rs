//! Full path through the platform: publish a targeted Basic survey, collect
//! a rewarded response, and verify dedup and eligibility partitioning.

use chrono::{Datelike, NaiveDate, Utc};
use fillscout_core::{
    eligibility::IneligibilityReason,
    error::CoreError,
    platform::SurveyPlatform,
    profile::{RespondentProfile, StaticProfiles},
    survey::{DemographicFilter, DraftFields, Plan, Question, QuestionKind, Visibility},
};
use serde_json::json;

fn profile(gender: &str) -> RespondentProfile {
    let today = Utc::now().date_naive();
    RespondentProfile {
        gender: gender.to_string(),
        birth_date: NaiveDate::from_ymd_opt(today.year() - 28, 6, 1).unwrap(),
        marital_status: "single".to_string(),
        city: "lahore".to_string(),
        education: "bachelors".to_string(),
        profession: "engineer".to_string(),
        salary_band: "50k-100k".to_string(),
        interests: vec!["technology".to_string()],
    }
}

#[test]
fn basic_private_survey_full_cycle() {
    let mut profiles = StaticProfiles::new();
    profiles.insert("resp-a", profile("male"));
    profiles.insert("resp-b", profile("female"));
    let p = SurveyPlatform::in_memory(Box::new(profiles)).unwrap();

    // Creator publishes a Basic survey targeted at men.
    let fields = DraftFields {
        title: "Grooming products".to_string(),
        description: "Short survey about daily routines".to_string(),
        category: "health".to_string(),
        visibility: Visibility::Private,
        filter: Some(DemographicFilter {
            gender: Some("Male".to_string()),
            ..Default::default()
        }),
        questions: vec![
            Question::text_only(QuestionKind::ShortText, "Which brand do you use?"),
            Question::with_options(
                QuestionKind::MultipleChoice,
                "How often do you buy?",
                vec!["monthly".into(), "quarterly".into(), "rarely".into()],
            ),
        ],
    };
    let survey = p.create_survey("creator-1", fields).unwrap();
    let survey = p.publish_survey(&survey.survey_id, Plan::Basic).unwrap();
    assert_eq!(survey.price, 300.0);
    assert_eq!(survey.total_responses, 100);

    // Respondent A (male) sees it, completes it, and is paid 3.00.
    let listing = p.list_available("resp-a").unwrap();
    let entry = listing
        .iter()
        .find(|e| e.survey.survey_id == survey.survey_id)
        .unwrap();
    assert!(entry.eligible);
    assert_eq!(entry.unit_reward, 3.00);

    let record = p
        .submit_response(&survey.survey_id, "resp-a", json!({"brand": "acme"}))
        .unwrap();
    assert_eq!(record.reward, 3.00);
    assert_eq!(p.wallet_balance("resp-a").unwrap(), 3.00);
    assert_eq!(p.survey(&survey.survey_id).unwrap().responses_collected, 1);

    // A second submission from A is rejected with no state change.
    assert!(matches!(
        p.submit_response(&survey.survey_id, "resp-a", json!({"brand": "other"})),
        Err(CoreError::DuplicateCompletion { .. })
    ));
    assert_eq!(p.wallet_balance("resp-a").unwrap(), 3.00);
    assert_eq!(p.survey(&survey.survey_id).unwrap().responses_collected, 1);

    // And A's listing now flags the survey as already completed.
    let listing = p.list_available("resp-a").unwrap();
    let entry = listing
        .iter()
        .find(|e| e.survey.survey_id == survey.survey_id)
        .unwrap();
    assert_eq!(entry.reason, Some(IneligibilityReason::AlreadyCompleted));

    // Respondent B (female) fails the demographic filter, distinctly.
    let listing = p.list_available("resp-b").unwrap();
    let entry = listing
        .iter()
        .find(|e| e.survey.survey_id == survey.survey_id)
        .unwrap();
    assert!(!entry.eligible);
    assert_eq!(entry.reason, Some(IneligibilityReason::NotEligible));
}
