//! Demographic filter matcher — does a respondent profile satisfy a survey's
//! targeting filter?
//!
//! Specified fields compare case-insensitively and whitespace-trimmed; unset
//! fields never block a match. A malformed age range fails OPEN: the one
//! constraint is ignored rather than hiding the survey from every respondent.
//!
//! Salary band and interest tags are collected by the filter structure but
//! not evaluated here. That asymmetry is intentional pending a product
//! decision on completing the rollout — do not "fix" it silently.

use crate::{
    profile::RespondentProfile,
    survey::{DemographicFilter, Survey, Visibility},
};
use log::debug;

/// Filter check in survey context: public surveys match every profile, and a
/// survey with no filter at all constrains nothing.
pub fn survey_matches(survey: &Survey, profile: &RespondentProfile) -> bool {
    if survey.visibility == Visibility::Public {
        return true;
    }
    match &survey.filter {
        None => true,
        Some(filter) => matches(profile, filter),
    }
}

/// Does `profile` satisfy every constraint `filter` specifies?
pub fn matches(profile: &RespondentProfile, filter: &DemographicFilter) -> bool {
    if filter.is_empty() {
        return true;
    }

    if !field_matches(filter.gender.as_deref(), &profile.gender)
        || !field_matches(filter.marital_status.as_deref(), &profile.marital_status)
        || !field_matches(filter.city.as_deref(), &profile.city)
        || !field_matches(filter.education.as_deref(), &profile.education)
        || !field_matches(filter.profession.as_deref(), &profile.profession)
    {
        return false;
    }

    if let Some(raw) = filter.age_range.as_deref() {
        match parse_age_range(raw) {
            Some((min, max)) => {
                let age = profile.age();
                if age < min || age > max {
                    return false;
                }
            }
            None => {
                debug!("ignoring malformed age range filter {raw:?}");
            }
        }
    }

    true
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        None => true,
        Some(w) => norm(w) == norm(actual),
    }
}

fn norm(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Parse an inclusive "min-max" age range. Returns None on malformed input
/// (missing separator, non-numeric bounds, inverted range).
pub fn parse_age_range(raw: &str) -> Option<(u32, u32)> {
    let (lo, hi) = raw.split_once('-')?;
    let min = lo.trim().parse::<u32>().ok()?;
    let max = hi.trim().parse::<u32>().ok()?;
    (min <= max).then_some((min, max))
}
