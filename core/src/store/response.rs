//! Response ledger queries — the atomic completion transaction lives here.

use super::{fmt_ts, parse_ts, Store};
use crate::{
    error::{CoreError, CoreResult},
    ledger::{PaymentStatus, ResponseRecord},
    reward,
    survey::SurveyStatus,
    types::SurveyId,
};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row, Transaction, TransactionBehavior};
use uuid::Uuid;

impl Store {
    /// Record a completion as one atomic unit:
    ///   1. published-status gate on the survey row,
    ///   2. response insert — the unique index on (survey_id, respondent_id)
    ///      turns a racing duplicate into DuplicateCompletion, no pre-read,
    ///   3. capacity check and counter increment as ONE conditional UPDATE,
    ///   4. wallet credit via upsert.
    /// Any gate failure rolls the whole transaction back; counters, the
    /// response set, and the wallet are never observed out of step.
    pub fn record_completion(
        &self,
        survey_id: &str,
        respondent_id: &str,
        payload: &serde_json::Value,
    ) -> CoreResult<ResponseRecord> {
        let now = Utc::now();
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        let frozen = tx
            .query_row(
                "SELECT status, price, total_responses FROM survey WHERE survey_id = ?1",
                params![survey_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, i64>(2)?,
                    ))
                },
            )
            .optional()?;
        let (status, price, total_responses) = frozen.ok_or_else(|| CoreError::NotFound {
            kind: "survey",
            id: survey_id.to_string(),
        })?;
        if SurveyStatus::parse(&status)? != SurveyStatus::Published {
            return Err(CoreError::SurveyNotAcceptingResponses(survey_id.to_string()));
        }

        let record = ResponseRecord {
            response_id: Uuid::new_v4().to_string(),
            survey_id: survey_id.to_string(),
            respondent_id: respondent_id.to_string(),
            payload: payload.clone(),
            reward: reward::unit_reward(price, total_responses as u32),
            payment_status: PaymentStatus::Paid,
            completed_at: now,
        };

        let inserted = tx.execute(
            "INSERT INTO response (
                response_id, survey_id, respondent_id, payload, reward,
                payment_status, completed_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &record.response_id,
                survey_id,
                respondent_id,
                serde_json::to_string(payload)?,
                record.reward,
                record.payment_status.as_str(),
                fmt_ts(now),
            ],
        );
        if let Err(e) = inserted {
            if is_unique_violation(&e) {
                return Err(CoreError::DuplicateCompletion {
                    survey_id: survey_id.to_string(),
                    respondent_id: respondent_id.to_string(),
                });
            }
            return Err(e.into());
        }

        let bumped = tx.execute(
            "UPDATE survey SET responses_collected = responses_collected + 1, updated_at = ?2
             WHERE survey_id = ?1 AND responses_collected < total_responses",
            params![survey_id, fmt_ts(now)],
        )?;
        if bumped == 0 {
            // Rolls back the response insert above.
            return Err(CoreError::SurveyFull(survey_id.to_string()));
        }

        tx.execute(
            "INSERT INTO wallet (owner_id, balance) VALUES (?1, ?2)
             ON CONFLICT(owner_id) DO UPDATE SET balance = balance + excluded.balance",
            params![respondent_id, record.reward],
        )?;

        tx.commit()?;
        Ok(record)
    }

    pub fn get_response(
        &self,
        survey_id: &str,
        respondent_id: &str,
    ) -> CoreResult<Option<ResponseRecord>> {
        let raw = self
            .conn
            .query_row(
                &format!(
                    "SELECT {RESPONSE_COLUMNS} FROM response
                     WHERE survey_id = ?1 AND respondent_id = ?2"
                ),
                params![survey_id, respondent_id],
                raw_response_mapper,
            )
            .optional()?;
        raw.map(response_from_raw).transpose()
    }

    /// All responses for a survey, oldest first.
    pub fn responses_for_survey(&self, survey_id: &str) -> CoreResult<Vec<ResponseRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESPONSE_COLUMNS} FROM response
             WHERE survey_id = ?1
             ORDER BY completed_at ASC, rowid ASC"
        ))?;
        let raws = stmt
            .query_map(params![survey_id], raw_response_mapper)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(response_from_raw).collect()
    }

    pub fn completed_survey_ids(&self, respondent_id: &str) -> CoreResult<Vec<SurveyId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT survey_id FROM response WHERE respondent_id = ?1")?;
        let ids = stmt
            .query_map(params![respondent_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    pub fn response_count(&self, survey_id: &str) -> CoreResult<i64> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM response WHERE survey_id = ?1",
                params![survey_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }

    /// Sum of frozen reward amounts issued for a survey.
    pub fn total_rewards_for_survey(&self, survey_id: &str) -> CoreResult<f64> {
        self.conn
            .query_row(
                "SELECT COALESCE(SUM(reward), 0.0) FROM response WHERE survey_id = ?1",
                params![survey_id],
                |row| row.get(0),
            )
            .map_err(Into::into)
    }
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

// ── Row mapping ────────────────────────────────────────────────

const RESPONSE_COLUMNS: &str =
    "response_id, survey_id, respondent_id, payload, reward, payment_status, completed_at";

struct RawResponse {
    response_id: String,
    survey_id: String,
    respondent_id: String,
    payload: String,
    reward: f64,
    payment_status: String,
    completed_at: String,
}

fn raw_response_mapper(row: &Row<'_>) -> rusqlite::Result<RawResponse> {
    Ok(RawResponse {
        response_id: row.get(0)?,
        survey_id: row.get(1)?,
        respondent_id: row.get(2)?,
        payload: row.get(3)?,
        reward: row.get(4)?,
        payment_status: row.get(5)?,
        completed_at: row.get(6)?,
    })
}

fn response_from_raw(raw: RawResponse) -> CoreResult<ResponseRecord> {
    Ok(ResponseRecord {
        response_id: raw.response_id,
        survey_id: raw.survey_id,
        respondent_id: raw.respondent_id,
        payload: serde_json::from_str(&raw.payload)?,
        reward: raw.reward,
        payment_status: PaymentStatus::parse(&raw.payment_status)?,
        completed_at: parse_ts(&raw.completed_at)?,
    })
}
