// SPDX-License-Identifier: MIT
//! Profile assembly: concurrent fan-out over the three upstream resources,
//! joined into one normalized [`Profile`].

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::client::JudgeClient;
use crate::error::JudgeError;
use crate::model::Profile;
use crate::stats;

/// Assembles full profiles through a shared [`JudgeClient`].
pub struct ProfileAssembler {
    client: Arc<JudgeClient>,
}

impl ProfileAssembler {
    pub fn new(client: Arc<JudgeClient>) -> Self {
        Self { client }
    }

    /// Assemble the full profile for `handle`.
    ///
    /// User info, rating history, and submissions are fetched concurrently;
    /// the join is all-or-nothing — if any fetch fails, the whole assembly
    /// fails and no partial profile is returned. The reported error is the
    /// first failure observed, wrapped with the handle for context.
    pub async fn assemble(&self, handle: &str) -> Result<Profile, JudgeError> {
        let (user, rating_history, submissions) = tokio::try_join!(
            self.client.get_user_info(handle),
            self.client.get_rating_history(handle),
            self.client.get_submissions(handle),
        )
        .map_err(|e| e.for_handle(handle))?;

        let stats = stats::aggregate(&submissions);
        info!(
            handle,
            solved = stats.total_solved,
            submissions = stats.total_submissions,
            contests = rating_history.len(),
            "assembled profile"
        );

        Ok(Profile {
            user: user.normalize(),
            rating_history,
            stats,
            assembled_at: Utc::now(),
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
