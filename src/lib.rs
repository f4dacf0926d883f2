// SPDX-License-Identifier: MIT
//! cftrack — Codeforces profile aggregation pipeline.
//!
//! The core is a pure fetch-transform library: it talks to the judge's
//! public REST API through a TTL response cache, fetches the three profile
//! resources concurrently, and reduces the raw submission log into derived
//! statistics. It persists nothing and serves no HTTP itself; callers
//! (account creation, refresh, read-only profile views) decide when to
//! assemble and what to store.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod profile;
pub mod stats;
pub mod transport;

/// Test support: scripted transport with call counting. Not part of the
/// stable API.
#[doc(hidden)]
pub mod testutil;

pub use cache::ResponseCache;
pub use client::JudgeClient;
pub use config::ClientConfig;
pub use error::JudgeError;
pub use model::{AggregatedStats, Profile, RatingChange, Submission, UserInfo, Verdict};
pub use profile::ProfileAssembler;
