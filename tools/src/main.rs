//! fillscout-cli: headless demo runner for the survey platform.
//!
//! Seeds a deterministic respondent population, publishes a mix of public
//! and private surveys across the plan tiers, drives discovery and
//! submissions, and prints a summary.
//!
//! Usage:
//!   fillscout-cli --seed 42 --surveys 6 --fillers 40 --db demo.db

use anyhow::Result;
use chrono::NaiveDate;
use fillscout_core::{
    error::CoreError,
    platform::SurveyPlatform,
    profile::{RespondentProfile, StaticProfiles},
    reward,
    survey::{DemographicFilter, DraftFields, Plan, Question, QuestionKind, Visibility},
};
use log::info;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::env;

const GENDERS: &[&str] = &["male", "female"];
const CITIES: &[&str] = &["lahore", "karachi", "islamabad", "multan"];
const EDUCATIONS: &[&str] = &["matric", "intermediate", "bachelors", "masters"];
const PROFESSIONS: &[&str] = &["student", "engineer", "teacher", "doctor"];
const MARITAL: &[&str] = &["single", "married"];
const CATEGORIES: &[&str] = &["food", "technology", "health", "education"];

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let survey_count = parse_arg(&args, "--surveys", 6usize);
    let filler_count = parse_arg(&args, "--fillers", 40usize);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| ":memory:".to_string());

    let mut rng = Pcg64::seed_from_u64(seed);

    let filler_ids: Vec<String> = (0..filler_count).map(|i| format!("filler-{i:03}")).collect();
    let mut profiles = StaticProfiles::new();
    for id in &filler_ids {
        profiles.insert(id.clone(), random_profile(&mut rng));
    }

    let platform = SurveyPlatform::open(&db, Box::new(profiles))?;
    info!("platform opened at {db}, seed {seed}");

    // Creators publish a mix of public and private surveys across the tiers.
    let plans = [
        Plan::Basic,
        Plan::Standard,
        Plan::Premium,
        Plan::Custom { responses: 50 },
    ];
    let mut survey_ids = Vec::with_capacity(survey_count);
    for i in 0..survey_count {
        let creator = format!("creator-{:02}", i % 3);
        let private = rng.gen_bool(0.5);
        let fields = DraftFields {
            title: format!("Survey #{i}"),
            description: "Seeded demo survey".to_string(),
            category: pick(&mut rng, CATEGORIES),
            visibility: if private {
                Visibility::Private
            } else {
                Visibility::Public
            },
            filter: if private {
                Some(random_filter(&mut rng))
            } else {
                None
            },
            questions: vec![
                Question::text_only(QuestionKind::ShortText, "What stood out to you?"),
                Question::with_options(
                    QuestionKind::MultipleChoice,
                    "How often do you use this?",
                    vec!["daily".into(), "weekly".into(), "never".into()],
                ),
            ],
        };
        let draft = platform.create_survey(&creator, fields)?;
        let published = platform.publish_survey(&draft.survey_id, plans[i % plans.len()])?;
        survey_ids.push(published.survey_id);
    }

    // Fillers discover surveys and complete everything they are eligible for.
    let mut completed = 0u64;
    let mut skipped_ineligible = 0u64;
    let mut rejected_full = 0u64;
    for id in &filler_ids {
        for entry in platform.list_available(id)? {
            if !entry.eligible {
                skipped_ineligible += 1;
                continue;
            }
            let payload = serde_json::json!({ "answers": ["it works", "weekly"] });
            match platform.submit_response(&entry.survey.survey_id, id, payload) {
                Ok(_) => completed += 1,
                Err(CoreError::SurveyFull(_)) => rejected_full += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    println!("seed {seed}: {survey_count} surveys, {filler_count} fillers");
    println!(
        "completions: {completed}  (ineligible skips: {skipped_ineligible}, capacity rejections: {rejected_full})"
    );
    for survey_id in &survey_ids {
        let s = platform.survey(survey_id)?;
        println!(
            "  {:<28} {:<7} {:>4}/{:<5} collected  unit {:>6.2}",
            s.title,
            s.visibility.as_str(),
            s.responses_collected,
            s.total_responses,
            reward::unit_reward(s.price, s.total_responses),
        );
    }

    let total_paid = filler_ids
        .iter()
        .try_fold(0.0f64, |acc, id| platform.wallet_balance(id).map(|b| acc + b))?;
    println!("total rewards credited: {total_paid:.2}");

    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn pick(rng: &mut Pcg64, choices: &[&str]) -> String {
    choices[rng.gen_range(0..choices.len())].to_string()
}

fn random_profile(rng: &mut Pcg64) -> RespondentProfile {
    let year = rng.gen_range(1965..=2007);
    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    RespondentProfile {
        gender: pick(rng, GENDERS),
        birth_date: NaiveDate::from_ymd_opt(year, month, day).expect("valid synthetic date"),
        marital_status: pick(rng, MARITAL),
        city: pick(rng, CITIES),
        education: pick(rng, EDUCATIONS),
        profession: pick(rng, PROFESSIONS),
        salary_band: "25k-50k".to_string(),
        interests: vec!["technology".to_string()],
    }
}

fn random_filter(rng: &mut Pcg64) -> DemographicFilter {
    let gender = if rng.gen_bool(0.6) {
        Some(pick(rng, GENDERS))
    } else {
        None
    };
    let age_range = rng.gen_bool(0.5).then(|| "18-45".to_string());
    let city = if rng.gen_bool(0.4) {
        Some(pick(rng, CITIES))
    } else {
        None
    };
    DemographicFilter {
        gender,
        age_range,
        city,
        ..Default::default()
    }
}
