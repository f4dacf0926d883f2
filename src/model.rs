// SPDX-License-Identifier: MIT
//! Data model: upstream wire shapes and the normalized profile output.
//!
//! Wire types deserialize the judge API's camelCase field names. Output
//! types serialize snake_case with RFC 3339 timestamps; `countsByDate` keys
//! are UTC calendar dates (`YYYY-MM-DD`).

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

// ─── User info ────────────────────────────────────────────────────────────────

/// Immutable snapshot of a user as returned by the user-info endpoint.
///
/// Rating fields are absent for unrated users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rating: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Larger profile photo; used as a fallback when `avatar` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friend_of_count: Option<i64>,
    pub registration_time_seconds: i64,
}

impl UserInfo {
    /// Collapse the two upstream photo fields into one, preferring `avatar`.
    pub fn normalize(mut self) -> Self {
        if self.avatar.is_none() {
            self.avatar = self.title_photo.take();
        }
        self
    }
}

// ─── Rating history ───────────────────────────────────────────────────────────

/// One rated contest participation. Wire shape, chronological upstream order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChangeWire {
    pub contest_id: i64,
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub rating_update_time_seconds: i64,
}

/// Normalized rating change event with an ISO-8601 timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub contest_id: i64,
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub occurred_at: DateTime<Utc>,
}

impl From<RatingChangeWire> for RatingChange {
    fn from(wire: RatingChangeWire) -> Self {
        Self {
            contest_id: wire.contest_id,
            contest_name: wire.contest_name,
            rank: wire.rank,
            old_rating: wire.old_rating,
            new_rating: wire.new_rating,
            occurred_at: epoch_seconds(wire.rating_update_time_seconds),
        }
    }
}

// ─── Submissions ──────────────────────────────────────────────────────────────

/// Submission outcome labels used by the judge.
///
/// Unknown labels fall through to `Other` so new upstream verdicts degrade
/// instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Ok,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    IdlenessLimitExceeded,
    Challenged,
    Partial,
    Skipped,
    Testing,
    #[serde(other)]
    Other,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Ok
    }
}

/// Problem reference attached to a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Absent for problems outside regular contests (e.g. acmsguru archive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<i64>,
    pub index: String,
    /// Difficulty rating; absent for unrated problems.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Problem {
    /// Stable problem identity: contest id + index (e.g. `"4A"`).
    pub fn key(&self) -> String {
        match self.contest_id {
            Some(id) => format!("{id}{}", self.index),
            None => self.index.clone(),
        }
    }
}

/// One submission from the submission-list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,
    /// Absent while the submission is still being judged.
    #[serde(default)]
    pub verdict: Option<Verdict>,
    pub problem: Problem,
    pub creation_time_seconds: i64,
}

impl Submission {
    pub fn submitted_at(&self) -> DateTime<Utc> {
        epoch_seconds(self.creation_time_seconds)
    }
}

// ─── Aggregated statistics ────────────────────────────────────────────────────

/// Difficulty bucket key: the numeric rating, or `"unrated"`.
pub fn difficulty_bucket(rating: Option<i64>) -> String {
    match rating {
        Some(r) => r.to_string(),
        None => "unrated".to_string(),
    }
}

/// Statistics derived from a submission list. Recomputed from scratch on
/// every aggregation; never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStats {
    pub total_solved: u64,
    pub total_submissions: u64,
    /// Solved-problem counts keyed by difficulty bucket (`"800"`, `"unrated"`).
    pub counts_by_difficulty: BTreeMap<String, u64>,
    /// Solved-problem counts keyed by problem tag.
    pub counts_by_tag: BTreeMap<String, u64>,
    /// Submission counts keyed by verdict, over all submissions.
    pub counts_by_verdict: BTreeMap<Verdict, u64>,
    /// Submission counts keyed by UTC calendar date (`YYYY-MM-DD`).
    pub counts_by_date: BTreeMap<String, u64>,
}

// ─── Profile ──────────────────────────────────────────────────────────────────

/// Fully assembled profile: user snapshot, rating history, derived stats.
///
/// Constructed once per assembly and handed to the caller; the core retains
/// nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub user: UserInfo,
    pub rating_history: Vec<RatingChange>,
    pub stats: AggregatedStats,
    pub assembled_at: DateTime<Utc>,
}

fn epoch_seconds(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

// ─── Tests ────────────────────────────────────────────────────────────────────
