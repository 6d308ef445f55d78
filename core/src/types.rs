//! Shared primitive types used across the entire crate.

/// A stable, unique identifier for a survey.
pub type SurveyId = String;

/// A stable, unique identifier for a user — creator or respondent.
pub type UserId = String;

/// A stable, unique identifier for a recorded response.
pub type ResponseId = String;
