// SPDX-License-Identifier: MIT
// End-to-end pipeline tests: assembler → client → cache → scripted transport.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use cftrack::testutil::MockTransport;
use cftrack::{ClientConfig, JudgeClient, JudgeError, ProfileAssembler, ResponseCache, Verdict};

fn ok(result: serde_json::Value) -> String {
    json!({"status": "OK", "result": result}).to_string()
}

fn scripted_transport(handle: &str) -> Arc<MockTransport> {
    Arc::new(
        MockTransport::new()
            .route(
                "/user.info",
                ok(json!([{
                    "handle": handle,
                    "rating": 2100,
                    "maxRating": 2300,
                    "rank": "master",
                    "avatar": "https://example.org/avatar.jpg",
                    "registrationTimeSeconds": 1400000000
                }])),
            )
            .route(
                "/user.rating",
                ok(json!([
                    {
                        "contestId": 600,
                        "contestName": "Round 600",
                        "rank": 120,
                        "oldRating": 2000,
                        "newRating": 2100,
                        "ratingUpdateTimeSeconds": 1500000000
                    }
                ])),
            )
            .route(
                "/user.status",
                ok(json!([
                    {
                        "id": 3,
                        "verdict": "OK",
                        "problem": {"contestId": 4, "index": "A", "rating": 800, "tags": ["math"]},
                        "creationTimeSeconds": 1500000200
                    },
                    {
                        "id": 2,
                        "verdict": "WRONG_ANSWER",
                        "problem": {"contestId": 4, "index": "A", "rating": 800, "tags": ["math"]},
                        "creationTimeSeconds": 1500000100
                    },
                    {
                        "id": 1,
                        "verdict": "OK",
                        "problem": {"contestId": 10, "index": "B", "tags": []},
                        "creationTimeSeconds": 1500000000
                    }
                ])),
            ),
    )
}

fn pipeline(transport: Arc<MockTransport>, ttl: Duration) -> ProfileAssembler {
    let config = ClientConfig {
        api_base_url: "https://judge.test/api".into(),
        cache_ttl: ttl,
        ..ClientConfig::default()
    };
    let cache = Arc::new(ResponseCache::new(ttl));
    ProfileAssembler::new(Arc::new(JudgeClient::new(config, cache, transport)))
}

// ─── Assembly ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_pipeline_produces_normalized_profile() {
    let assembler = pipeline(scripted_transport("petr"), Duration::from_secs(60));
    let profile = assembler.assemble("petr").await.unwrap();

    assert_eq!(profile.user.handle, "petr");
    assert_eq!(profile.user.avatar.as_deref(), Some("https://example.org/avatar.jpg"));
    assert_eq!(profile.rating_history.len(), 1);
    assert_eq!(profile.rating_history[0].new_rating, 2100);

    // 4A solved once despite the retry; 10B solved and unrated.
    assert_eq!(profile.stats.total_solved, 2);
    assert_eq!(profile.stats.total_submissions, 3);
    assert_eq!(profile.stats.counts_by_verdict[&Verdict::Ok], 2);
    assert_eq!(profile.stats.counts_by_verdict[&Verdict::WrongAnswer], 1);
    assert_eq!(profile.stats.counts_by_difficulty["800"], 1);
    assert_eq!(profile.stats.counts_by_difficulty["unrated"], 1);
    assert_eq!(profile.stats.counts_by_tag["math"], 1);
}

#[tokio::test]
async fn profile_serializes_with_iso_timestamps_and_date_keys() {
    let assembler = pipeline(scripted_transport("petr"), Duration::from_secs(60));
    let profile = assembler.assemble("petr").await.unwrap();

    let out = serde_json::to_value(&profile).unwrap();
    assert!(out["assembled_at"].as_str().unwrap().contains('T'));
    assert!(out["rating_history"][0]["occurred_at"].as_str().unwrap().contains('T'));

    let dates = out["stats"]["counts_by_date"].as_object().unwrap();
    for key in dates.keys() {
        assert_eq!(key.len(), 10, "date key must be YYYY-MM-DD: {key}");
        assert_eq!(&key[4..5], "-");
        assert_eq!(&key[7..8], "-");
    }
}

// ─── Cache behavior across assemblies ─────────────────────────────────────────

#[tokio::test]
async fn repeat_assembly_within_ttl_reuses_cached_responses() {
    let transport = scripted_transport("tourist");
    let assembler = pipeline(transport.clone(), Duration::from_secs(60));

    assembler.assemble("tourist").await.unwrap();
    assembler.assemble("tourist").await.unwrap();

    assert_eq!(transport.calls(), 3, "one upstream call per endpoint");
}

#[tokio::test]
async fn assembly_after_ttl_refetches_every_endpoint() {
    let transport = scripted_transport("tourist");
    let assembler = pipeline(transport.clone(), Duration::from_millis(20));

    assembler.assemble("tourist").await.unwrap();
    tokio::time::sleep(Duration::from_millis(40)).await;
    assembler.assemble("tourist").await.unwrap();

    assert_eq!(transport.calls(), 6, "expired cache must refetch all three");
}

#[tokio::test]
async fn distinct_handles_do_not_share_cache_entries() {
    let transport = Arc::new(
        MockTransport::new()
            .route("handles=alice", ok(json!([{"handle": "alice", "registrationTimeSeconds": 0}])))
            .route("handles=bob", ok(json!([{"handle": "bob", "registrationTimeSeconds": 0}])))
            .route("/user.rating", ok(json!([])))
            .route("/user.status", ok(json!([]))),
    );
    let assembler = pipeline(transport.clone(), Duration::from_secs(60));

    let alice = assembler.assemble("alice").await.unwrap();
    let bob = assembler.assemble("bob").await.unwrap();
    assert_eq!(alice.user.handle, "alice");
    assert_eq!(bob.user.handle, "bob");
    assert_eq!(transport.calls(), 6);
}

// ─── Failure propagation ──────────────────────────────────────────────────────

#[tokio::test]
async fn missing_handle_fails_assembly_with_not_found() {
    let transport = Arc::new(MockTransport::always(
        json!({
            "status": "FAILED",
            "comment": "handles: User with handle nobody not found"
        })
        .to_string(),
    ));
    let assembler = pipeline(transport, Duration::from_secs(60));

    let err = assembler.assemble("nobody").await.unwrap_err();
    assert!(err.is_handle_not_found());
    assert!(err.to_string().contains("nobody"));
}

#[tokio::test]
async fn partial_upstream_outage_yields_no_profile() {
    // user.info and user.rating succeed, user.status is down.
    let transport = Arc::new(
        MockTransport::new()
            .route("/user.info", ok(json!([{"handle": "x", "registrationTimeSeconds": 0}])))
            .route("/user.rating", ok(json!([])))
            .route_err("/user.status", "connection reset by peer"),
    );
    let assembler = pipeline(transport, Duration::from_secs(60));

    match assembler.assemble("x").await {
        Err(JudgeError::Profile { handle, .. }) => assert_eq!(handle, "x"),
        other => panic!("expected all-or-nothing failure, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_fetch_is_retried_on_next_assembly() {
    // First round fails on user.status; nothing negative is cached, so a
    // second assembly re-attempts the failed endpoint.
    let transport = Arc::new(
        MockTransport::new()
            .route("/user.info", ok(json!([{"handle": "x", "registrationTimeSeconds": 0}])))
            .route("/user.rating", ok(json!([])))
            .route_err("/user.status", "connection reset by peer"),
    );
    let assembler = pipeline(transport.clone(), Duration::from_secs(60));

    assert!(assembler.assemble("x").await.is_err());
    let first_round = transport.calls_to("/user.status");
    assert!(assembler.assemble("x").await.is_err());
    assert_eq!(
        transport.calls_to("/user.status"),
        first_round + 1,
        "failures must not be cached"
    );
}
