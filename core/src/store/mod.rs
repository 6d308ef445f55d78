//! SQLite persistence layer.
//!
//! RULE: Only the store module talks to the database.
//! Domain modules call store methods — they never execute SQL directly.
//!
//! Status transitions and counter bumps are single conditional statements
//! (expected-previous-state in the WHERE clause); the caller learns whether
//! it won the race from the changed-row count.

mod response;
mod wallet;

use crate::{
    error::{CoreError, CoreResult},
    survey::{DemographicFilter, DraftFields, Question, Survey, SurveyStatus, Visibility},
};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::time::Duration;

pub struct Store {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for a file
}

impl Store {
    pub fn open(path: &str) -> CoreResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only matters for real files (:memory: ignores it).
        // Independent writers then queue on the busy handler instead of
        // failing outright.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> CoreResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database. For in-memory stores
    /// this returns a fresh, isolated database.
    pub fn reopen(&self) -> CoreResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> CoreResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_surveys.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_responses.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_wallets.sql"))?;
        Ok(())
    }

    // ── Survey ─────────────────────────────────────────────────

    pub fn insert_survey(&self, s: &Survey) -> CoreResult<()> {
        self.conn.execute(
            "INSERT INTO survey (
                survey_id, owner_id, title, description, category, visibility,
                filter_json, questions_json, price, total_responses,
                responses_collected, status, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                &s.survey_id,
                &s.owner_id,
                &s.title,
                &s.description,
                &s.category,
                s.visibility.as_str(),
                filter_to_json(s.filter.as_ref())?,
                serde_json::to_string(&s.questions)?,
                s.price,
                s.total_responses as i64,
                s.responses_collected as i64,
                s.status.as_str(),
                fmt_ts(s.created_at),
                fmt_ts(s.updated_at),
            ],
        )?;
        Ok(())
    }

    pub fn get_survey(&self, survey_id: &str) -> CoreResult<Survey> {
        let raw = self
            .conn
            .query_row(
                &format!("SELECT {SURVEY_COLUMNS} FROM survey WHERE survey_id = ?1"),
                params![survey_id],
                raw_survey_mapper,
            )
            .optional()?
            .ok_or_else(|| CoreError::NotFound {
                kind: "survey",
                id: survey_id.to_string(),
            })?;
        survey_from_raw(raw)
    }

    /// Replace the creator-editable fields. Guarded on status = draft;
    /// returns the changed-row count (0 means missing or not a draft).
    pub fn update_draft_fields(
        &self,
        survey_id: &str,
        fields: &DraftFields,
        now: DateTime<Utc>,
    ) -> CoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE survey SET
                title = ?2, description = ?3, category = ?4, visibility = ?5,
                filter_json = ?6, questions_json = ?7, updated_at = ?8
             WHERE survey_id = ?1 AND status = 'draft'",
            params![
                survey_id,
                &fields.title,
                &fields.description,
                &fields.category,
                fields.visibility.as_str(),
                filter_to_json(fields.filter.as_ref())?,
                serde_json::to_string(&fields.questions)?,
                fmt_ts(now),
            ],
        )?;
        Ok(changed)
    }

    /// Freeze price and response target and flip draft → published.
    pub fn publish_survey(
        &self,
        survey_id: &str,
        price: f64,
        total_responses: u32,
        now: DateTime<Utc>,
    ) -> CoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE survey SET
                status = 'published', price = ?2, total_responses = ?3, updated_at = ?4
             WHERE survey_id = ?1 AND status = 'draft'",
            params![survey_id, price, total_responses as i64, fmt_ts(now)],
        )?;
        Ok(changed)
    }

    /// Flip published → finished.
    pub fn finish_survey(&self, survey_id: &str, now: DateTime<Utc>) -> CoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE survey SET status = 'finished', updated_at = ?2
             WHERE survey_id = ?1 AND status = 'published'",
            params![survey_id, fmt_ts(now)],
        )?;
        Ok(changed)
    }

    /// Remove a draft. Guarded on status = draft.
    pub fn delete_draft(&self, survey_id: &str) -> CoreResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM survey WHERE survey_id = ?1 AND status = 'draft'",
            params![survey_id],
        )?;
        Ok(changed)
    }

    /// All published surveys, newest first.
    pub fn published_surveys(&self) -> CoreResult<Vec<Survey>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SURVEY_COLUMNS} FROM survey
             WHERE status = 'published'
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let raws = stmt
            .query_map([], raw_survey_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(survey_from_raw).collect()
    }

    /// Every survey a creator owns, regardless of status, newest first.
    pub fn surveys_by_owner(&self, owner_id: &str) -> CoreResult<Vec<Survey>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SURVEY_COLUMNS} FROM survey
             WHERE owner_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let raws = stmt
            .query_map(params![owner_id], raw_survey_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(survey_from_raw).collect()
    }
}

// ── Row mapping ────────────────────────────────────────────────

const SURVEY_COLUMNS: &str = "survey_id, owner_id, title, description, category, visibility, \
     filter_json, questions_json, price, total_responses, responses_collected, \
     status, created_at, updated_at";

/// Column values as SQLite hands them over; JSON and enum parsing happens
/// outside the rusqlite row closure so those errors surface as CoreError.
struct RawSurvey {
    survey_id: String,
    owner_id: String,
    title: String,
    description: String,
    category: String,
    visibility: String,
    filter_json: Option<String>,
    questions_json: String,
    price: f64,
    total_responses: i64,
    responses_collected: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

fn raw_survey_mapper(row: &Row<'_>) -> rusqlite::Result<RawSurvey> {
    Ok(RawSurvey {
        survey_id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        visibility: row.get(5)?,
        filter_json: row.get(6)?,
        questions_json: row.get(7)?,
        price: row.get(8)?,
        total_responses: row.get(9)?,
        responses_collected: row.get(10)?,
        status: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn survey_from_raw(raw: RawSurvey) -> CoreResult<Survey> {
    let filter: Option<DemographicFilter> = match raw.filter_json.as_deref() {
        None => None,
        Some(json) => Some(serde_json::from_str(json)?),
    };
    let questions: Vec<Question> = serde_json::from_str(&raw.questions_json)?;
    Ok(Survey {
        survey_id: raw.survey_id,
        owner_id: raw.owner_id,
        title: raw.title,
        description: raw.description,
        category: raw.category,
        visibility: Visibility::parse(&raw.visibility)?,
        filter,
        questions,
        price: raw.price,
        total_responses: raw.total_responses as u32,
        responses_collected: raw.responses_collected as u32,
        status: SurveyStatus::parse(&raw.status)?,
        created_at: parse_ts(&raw.created_at)?,
        updated_at: parse_ts(&raw.updated_at)?,
    })
}

fn filter_to_json(filter: Option<&DemographicFilter>) -> CoreResult<Option<String>> {
    match filter {
        None => Ok(None),
        Some(f) => Ok(Some(serde_json::to_string(f)?)),
    }
}

/// Fixed-width RFC 3339 so lexicographic ORDER BY equals chronological order.
pub(crate) fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_ts(raw: &str) -> CoreResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| anyhow::anyhow!("bad timestamp '{raw}': {e}"))?
        .with_timezone(&Utc))
}
