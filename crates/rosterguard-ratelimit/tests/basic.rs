use rosterguard_errors::prelude::*;
use rosterguard_ratelimit::errors::rate_limited;
use rosterguard_ratelimit::prelude::*;
use rosterguard_types::prelude::ManualClock;
use std::sync::Arc;
use std::time::Duration;

fn login_identity() -> RequestIdentity {
    RequestIdentity::new(Some("1.2.3.4".into()), "/api/auth/login")
}

#[test]
fn login_window_admits_five_then_rejects_until_reset() {
    let clock = Arc::new(ManualClock::new(0));
    let limiter = RateLimiter::new(clock.clone(), SweepTrigger::Never);
    let policy = RateLimitPolicy::new(
        "auth",
        900_000,
        5,
        KeyStrategy::Client {
            prefix: "login".into(),
        },
    )
    .unwrap();
    let who = login_identity();
    assert_eq!(policy.key_for(&who), "login:1.2.3.4");

    for _ in 0..5 {
        assert!(limiter.decide(&policy, &who, 0).is_admitted());
    }

    match limiter.decide(&policy, &who, 100) {
        Decision::Reject(rejection) => {
            assert!((899..=900).contains(&rejection.retry_after_secs));
            assert_eq!(rejection.limit, 5);
            assert_eq!(rejection.remaining, 0);
            assert_eq!(rejection.reset_at_ms, 900_000);
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    match limiter.decide(&policy, &who, 900_001) {
        Decision::Admit(info) => {
            assert_eq!(info.remaining, 4);
            assert_eq!(info.reset_at_ms, 1_800_001);
        }
        other => panic!("expected admit after reset, got {other:?}"),
    }
    assert_eq!(limiter.store().peek("login:1.2.3.4").unwrap().count, 1);
}

#[test]
fn unattributable_clients_share_one_budget() {
    let limiter = RateLimiter::new(Arc::new(ManualClock::new(0)), SweepTrigger::Never);
    let policy = RateLimitPolicy::auth();

    for _ in 0..5 {
        assert!(limiter
            .check(&policy, &RequestIdentity::new(None, "/api/auth/login"))
            .is_admitted());
    }
    let blank = RequestIdentity::new(Some(String::new()), "/api/auth/login");
    assert!(!limiter.check(&policy, &blank).is_admitted());
}

#[test]
fn api_routes_have_separate_budgets() {
    let limiter = RateLimiter::new(Arc::new(ManualClock::new(0)), SweepTrigger::Never);
    let policy = RateLimitPolicy::new("tiny", 60_000, 1, KeyStrategy::ClientAndRoute).unwrap();
    let players = RequestIdentity::new(Some("5.5.5.5".into()), "/api/players");
    let games = RequestIdentity::new(Some("5.5.5.5".into()), "/api/games");

    assert!(limiter.check(&policy, &players).is_admitted());
    assert!(!limiter.check(&policy, &players).is_admitted());
    assert!(limiter.check(&policy, &games).is_admitted());
}

#[test]
fn rejection_maps_to_rate_limited_error() {
    let rejection = Rejection {
        retry_after_secs: 30,
        limit: 20,
        remaining: 0,
        reset_at_ms: 1_700_000_030_000,
    };
    let err = rate_limited(&rejection, "sensitive");
    assert_eq!(err.kind, ErrorKind::RateLimited);
    assert_eq!(err.meta_u64(meta_keys::RETRY_AFTER_SECS), Some(30));
    assert_eq!(err.meta_u64(meta_keys::LIMIT), Some(20));
    assert_eq!(err.meta_i64(meta_keys::RESET_AT_MS), Some(1_700_000_030_000));
    assert_eq!(err.to_public().retry_after, Some(30));
}

#[tokio::test(start_paused = true)]
async fn background_sweeper_drops_expired_windows_and_stops_with_limiter() {
    let clock = Arc::new(ManualClock::new(0));
    let limiter = Arc::new(RateLimiter::new(clock.clone(), SweepTrigger::Never));
    let policy = RateLimitPolicy::new("short", 10, 5, KeyStrategy::ClientAndRoute).unwrap();
    limiter.check(&policy, &RequestIdentity::new(Some("a".into()), "/r"));
    assert_eq!(limiter.store().len(), 1);

    clock.set(1_000);
    let handle = limiter.spawn_sweeper(Duration::from_secs(1));
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(limiter.store().is_empty());

    drop(limiter);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(handle.is_finished());
}
