// SPDX-License-Identifier: MIT
//! Error taxonomy for the aggregation pipeline.
//!
//! Callers are expected to branch on the variant, not on the rendered
//! message: `HandleNotFound` maps to a user-visible "not found", everything
//! else to a generic upstream failure.

/// Errors produced by [`JudgeClient`](crate::client::JudgeClient) and
/// [`ProfileAssembler`](crate::profile::ProfileAssembler).
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    /// The HTTP transport failed or the body was not valid JSON.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The upstream envelope carried a non-OK status. Holds the upstream
    /// `comment` text verbatim.
    #[error("upstream rejected request: {0}")]
    UpstreamRejected(String),

    /// Refinement of [`JudgeError::UpstreamRejected`]: the comment indicates
    /// the requested handle does not exist.
    #[error("handle not found: {0}")]
    HandleNotFound(String),

    /// One of the fan-out fetches inside profile assembly failed; the whole
    /// assembly is aborted and wrapped with the handle for context.
    #[error("failed to fetch profile data for {handle}: {source}")]
    Profile {
        handle: String,
        #[source]
        source: Box<JudgeError>,
    },
}

impl JudgeError {
    /// Wrap an error with the handle it was encountered for.
    ///
    /// Already-wrapped errors are returned unchanged so nested assembly
    /// paths never double-wrap.
    pub fn for_handle(self, handle: &str) -> Self {
        match self {
            e @ JudgeError::Profile { .. } => e,
            other => JudgeError::Profile {
                handle: handle.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// True when the underlying cause (after unwrapping any profile wrap)
    /// is a missing handle.
    pub fn is_handle_not_found(&self) -> bool {
        match self {
            JudgeError::HandleNotFound(_) => true,
            JudgeError::Profile { source, .. } => source.is_handle_not_found(),
            _ => false,
        }
    }
}
