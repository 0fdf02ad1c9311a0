use proptest::prelude::*;
use rosterguard_ratelimit::prelude::*;
use rosterguard_types::prelude::ManualClock;
use std::sync::{Arc, Barrier};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn concurrent_observe_loses_no_updates(callers in 1usize..48, per_caller in 1usize..16) {
        let store = Arc::new(WindowStore::new());
        let barrier = Arc::new(Barrier::new(callers));

        std::thread::scope(|scope| {
            for _ in 0..callers {
                let store = store.clone();
                let barrier = barrier.clone();
                scope.spawn(move || {
                    barrier.wait();
                    for _ in 0..per_caller {
                        store.observe("login:1.2.3.4", 10, 60_000);
                    }
                });
            }
        });

        let snap = store.peek("login:1.2.3.4").unwrap();
        prop_assert_eq!(snap.count, (callers * per_caller) as u64);
        prop_assert_eq!(snap.reset_at_ms, 60_010);
    }

    #[test]
    fn concurrent_decide_never_admits_more_than_ceiling(callers in 2usize..40, ceiling in 1u32..20) {
        let limiter = Arc::new(RateLimiter::new(
            Arc::new(ManualClock::new(0)),
            SweepTrigger::Probabilistic(0.5),
        ));
        let policy = Arc::new(
            RateLimitPolicy::new("p", 60_000, ceiling, KeyStrategy::ClientAndRoute).unwrap(),
        );
        let barrier = Arc::new(Barrier::new(callers));

        let admitted: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..callers)
                .map(|_| {
                    let limiter = limiter.clone();
                    let policy = policy.clone();
                    let barrier = barrier.clone();
                    scope.spawn(move || {
                        barrier.wait();
                        let who = RequestIdentity::new(Some("7.7.7.7".into()), "/api/games");
                        (0..3).filter(|_| limiter.check(&policy, &who).is_admitted()).count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        prop_assert_eq!(admitted, (callers * 3).min(ceiling as usize));
    }
}

#[test]
fn sweep_racing_observe_keeps_live_counts() {
    let store = Arc::new(WindowStore::new());
    std::thread::scope(|scope| {
        let observer = store.clone();
        scope.spawn(move || {
            for _ in 0..10_000 {
                observer.observe("hot", 100, 1_000);
            }
        });
        let sweeper = store.clone();
        scope.spawn(move || {
            for _ in 0..1_000 {
                sweeper.sweep(500);
            }
        });
    });
    assert_eq!(store.peek("hot").unwrap().count, 10_000);
}
