use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid state transition: survey {survey_id} is {status}, expected {expected}")]
    InvalidStateTransition {
        survey_id: String,
        status: String,
        expected: String,
    },

    #[error("Survey {0} is not accepting responses")]
    SurveyNotAcceptingResponses(String),

    #[error("Survey {0} has reached its response target")]
    SurveyFull(String),

    #[error("Respondent {respondent_id} already completed survey {survey_id}")]
    DuplicateCompletion {
        survey_id: String,
        respondent_id: String,
    },

    #[error("No profile found for respondent {0}")]
    ProfileNotFound(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
