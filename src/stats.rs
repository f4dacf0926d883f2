// SPDX-License-Identifier: MIT
//! Submission statistics reducer.
//!
//! A single linear pass over the submission list. Pure and total: malformed
//! records (missing verdict, missing rating, no tags) degrade into the
//! `Other` verdict / `"unrated"` bucket / no tag counts rather than failing.

use std::collections::HashSet;

use crate::model::{difficulty_bucket, AggregatedStats, Submission, Verdict};

/// Reduce a submission list into [`AggregatedStats`].
///
/// Input order matters for attribution: the upstream delivers submissions
/// newest first, and the first Accepted submission seen for a problem is the
/// one whose difficulty and tags are counted. With newest-first input that
/// is the latest solve. Totals are order-independent.
pub fn aggregate(submissions: &[Submission]) -> AggregatedStats {
    let mut stats = AggregatedStats {
        total_submissions: submissions.len() as u64,
        ..AggregatedStats::default()
    };
    let mut solved: HashSet<String> = HashSet::new();

    for sub in submissions {
        // Every submission counts toward verdict and date histograms,
        // regardless of problem repetition.
        let verdict = sub.verdict.unwrap_or(Verdict::Other);
        *stats.counts_by_verdict.entry(verdict).or_insert(0) += 1;

        let date = sub.submitted_at().format("%Y-%m-%d").to_string();
        *stats.counts_by_date.entry(date).or_insert(0) += 1;

        if !verdict.is_accepted() {
            continue;
        }
        let key = sub.problem.key();
        if !solved.insert(key) {
            continue;
        }

        let bucket = difficulty_bucket(sub.problem.rating);
        *stats.counts_by_difficulty.entry(bucket).or_insert(0) += 1;
        for tag in &sub.problem.tags {
            *stats.counts_by_tag.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    stats.total_solved = solved.len() as u64;
    stats
}

// ─── Tests ────────────────────────────────────────────────────────────────────
