use fillscout_core::{
    error::CoreError,
    platform::SurveyPlatform,
    profile::StaticProfiles,
    survey::{DraftFields, Plan, Question, QuestionKind, SurveyStatus, Visibility},
};

// ── Test helpers ────────────────────────────────────────────────────────────

fn platform() -> SurveyPlatform {
    SurveyPlatform::in_memory(Box::new(StaticProfiles::new())).unwrap()
}

fn valid_draft(title: &str) -> DraftFields {
    DraftFields {
        title: title.to_string(),
        description: "a test survey".to_string(),
        category: "food".to_string(),
        visibility: Visibility::Public,
        filter: None,
        questions: vec![
            Question::text_only(QuestionKind::ShortText, "Anything to add?"),
            Question::with_options(
                QuestionKind::Dropdown,
                "Pick one",
                vec!["a".to_string(), "b".to_string()],
            ),
        ],
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn create_starts_in_draft_with_zero_counters() {
    let p = platform();
    let s = p.create_survey("creator-1", valid_draft("Lunch habits")).unwrap();

    assert_eq!(s.status, SurveyStatus::Draft);
    assert_eq!(s.responses_collected, 0);
    assert_eq!(s.total_responses, 0);
    assert_eq!(s.price, 0.0);
    assert_eq!(s.owner_id, "creator-1");
}

#[test]
fn publish_basic_freezes_price_and_target() {
    let p = platform();
    let s = p.create_survey("creator-1", valid_draft("Lunch habits")).unwrap();
    let s = p.publish_survey(&s.survey_id, Plan::Basic).unwrap();

    assert_eq!(s.status, SurveyStatus::Published);
    assert_eq!(s.price, 300.0);
    assert_eq!(s.total_responses, 100);
}

#[test]
fn plan_catalog_resolves_all_tiers() {
    assert_eq!(Plan::Basic.resolve().unwrap(), (300.0, 100));
    assert_eq!(Plan::Standard.resolve().unwrap(), (750.0, 300));
    assert_eq!(Plan::Premium.resolve().unwrap(), (2000.0, 1000));
    assert_eq!(
        Plan::Custom { responses: 500 }.resolve().unwrap(),
        (1000.0, 500)
    );
}

#[test]
fn custom_plan_rejects_out_of_range_response_counts() {
    assert!(matches!(
        Plan::Custom { responses: 9 }.resolve(),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        Plan::Custom { responses: 10_001 }.resolve(),
        Err(CoreError::Validation(_))
    ));
    // Boundaries are inclusive.
    assert!(Plan::Custom { responses: 10 }.resolve().is_ok());
    assert!(Plan::Custom { responses: 10_000 }.resolve().is_ok());
}

#[test]
fn plan_lookup_by_id() {
    assert_eq!(Plan::from_id("basic", None).unwrap(), Plan::Basic);
    assert_eq!(
        Plan::from_id("custom", Some(50)).unwrap(),
        Plan::Custom { responses: 50 }
    );
    assert!(matches!(
        Plan::from_id("custom", None),
        Err(CoreError::Validation(_))
    ));
    assert!(matches!(
        Plan::from_id("deluxe", None),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn publish_with_empty_title_fails_and_stays_draft() {
    let p = platform();
    let mut draft = valid_draft("  ");
    draft.title = "  ".to_string();
    let s = p.create_survey("creator-1", draft).unwrap();

    let err = p.publish_survey(&s.survey_id, Plan::Basic).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    let unchanged = p.survey(&s.survey_id).unwrap();
    assert_eq!(unchanged.status, SurveyStatus::Draft);
    assert_eq!(unchanged.price, 0.0);
}

#[test]
fn publish_requires_category_and_question_text() {
    let p = platform();

    let mut no_category = valid_draft("Lunch habits");
    no_category.category = String::new();
    let s = p.create_survey("creator-1", no_category).unwrap();
    assert!(matches!(
        p.publish_survey(&s.survey_id, Plan::Basic),
        Err(CoreError::Validation(_))
    ));

    let mut blank_question = valid_draft("Lunch habits");
    blank_question.questions[0].text = "  ".to_string();
    let s = p.create_survey("creator-1", blank_question).unwrap();
    assert!(matches!(
        p.publish_survey(&s.survey_id, Plan::Basic),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn publish_requires_complete_options_on_choice_questions() {
    let p = platform();

    let mut no_options = valid_draft("Lunch habits");
    no_options.questions[1].options.clear();
    let s = p.create_survey("creator-1", no_options).unwrap();
    assert!(matches!(
        p.publish_survey(&s.survey_id, Plan::Basic),
        Err(CoreError::Validation(_))
    ));

    let mut blank_option = valid_draft("Lunch habits");
    blank_option.questions[1].options[1] = "  ".to_string();
    let s = p.create_survey("creator-1", blank_option).unwrap();
    assert!(matches!(
        p.publish_survey(&s.survey_id, Plan::Basic),
        Err(CoreError::Validation(_))
    ));
}

#[test]
fn update_allowed_only_while_draft() {
    let p = platform();
    let s = p.create_survey("creator-1", valid_draft("Before")).unwrap();

    let mut fields = valid_draft("After");
    fields.description = "updated".to_string();
    let s = p.update_survey(&s.survey_id, fields).unwrap();
    assert_eq!(s.title, "After");
    assert_eq!(s.description, "updated");

    p.publish_survey(&s.survey_id, Plan::Basic).unwrap();
    let err = p.update_survey(&s.survey_id, valid_draft("Nope")).unwrap_err();
    assert!(matches!(err, CoreError::InvalidStateTransition { .. }));
}

#[test]
fn finish_only_from_published_and_not_idempotent() {
    let p = platform();
    let s = p.create_survey("creator-1", valid_draft("Lunch habits")).unwrap();

    // draft → finish is not an edge
    assert!(matches!(
        p.finish_survey(&s.survey_id),
        Err(CoreError::InvalidStateTransition { .. })
    ));

    p.publish_survey(&s.survey_id, Plan::Basic).unwrap();
    let s = p.finish_survey(&s.survey_id).unwrap();
    assert_eq!(s.status, SurveyStatus::Finished);

    // a second explicit finish is an error, not a no-op
    assert!(matches!(
        p.finish_survey(&s.survey_id),
        Err(CoreError::InvalidStateTransition { .. })
    ));
}

#[test]
fn double_publish_fails() {
    let p = platform();
    let s = p.create_survey("creator-1", valid_draft("Lunch habits")).unwrap();
    p.publish_survey(&s.survey_id, Plan::Basic).unwrap();

    assert!(matches!(
        p.publish_survey(&s.survey_id, Plan::Standard),
        Err(CoreError::InvalidStateTransition { .. })
    ));

    // losing plan did not overwrite the frozen fields
    let s = p.survey(&s.survey_id).unwrap();
    assert_eq!(s.price, 300.0);
    assert_eq!(s.total_responses, 100);
}

#[test]
fn delete_removes_drafts_only() {
    let p = platform();

    let draft = p.create_survey("creator-1", valid_draft("Scratch")).unwrap();
    p.delete_survey(&draft.survey_id).unwrap();
    assert!(matches!(
        p.survey(&draft.survey_id),
        Err(CoreError::NotFound { .. })
    ));

    let published = p.create_survey("creator-1", valid_draft("Live")).unwrap();
    p.publish_survey(&published.survey_id, Plan::Basic).unwrap();
    assert!(matches!(
        p.delete_survey(&published.survey_id),
        Err(CoreError::InvalidStateTransition { .. })
    ));
}

#[test]
fn surveys_by_owner_lists_all_statuses() {
    let p = platform();
    let a = p.create_survey("creator-1", valid_draft("Draft one")).unwrap();
    let b = p.create_survey("creator-1", valid_draft("Published one")).unwrap();
    p.create_survey("creator-2", valid_draft("Someone else's")).unwrap();
    p.publish_survey(&b.survey_id, Plan::Basic).unwrap();

    let mine = p.surveys_by_owner("creator-1").unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().any(|s| s.survey_id == a.survey_id));
    assert!(mine.iter().any(|s| s.survey_id == b.survey_id));
}
