//! Behaviour every store backend has to exhibit, shared by the backend tests.

use std::{collections::HashSet, sync::Arc};

use crate::{Error, Provision, ProvisionOutcome, Settings, SettingsStore};

/// The `(maximum, step)` pairs to run the increment sequences with.
pub const SEQUENCE_CASES: &[(i64, i64)] = &[
    (10, 1),
    (10, 2),
    (10, 9),
    (10, 10),
    (10, 11),
    (0, 1),
    (i64::MAX, (1 << 62) + 1),
];

/// 2^53, the first integer past which doubles lose precision.
const DOUBLE_EXACT_LIMIT: i64 = 1 << 53;

/// A seeded counter and the values the increments must return from there.
pub struct BoundaryCase {
    /// The inclusive upper bound.
    pub maximum: i64,
    /// The increment step.
    pub step: i64,
    /// The seeded value.
    pub value: i64,
    /// The results of the consecutive increments.
    pub expected: &'static [i64],
}

/// Counters seeded close to the bounds doubles and `i64` can represent.
pub const BOUNDARY_CASES: &[BoundaryCase] = &[
    BoundaryCase {
        maximum: DOUBLE_EXACT_LIMIT + 3,
        step: 1,
        value: DOUBLE_EXACT_LIMIT + 2,
        expected: &[DOUBLE_EXACT_LIMIT + 3, 0, 1],
    },
    BoundaryCase {
        maximum: DOUBLE_EXACT_LIMIT + 3,
        step: 2,
        value: DOUBLE_EXACT_LIMIT + 2,
        expected: &[0, 2],
    },
    BoundaryCase {
        maximum: i64::MAX,
        step: 1,
        value: i64::MAX - 1,
        expected: &[i64::MAX, 0, 1],
    },
    BoundaryCase {
        maximum: i64::MAX - 1,
        step: 3,
        value: i64::MAX - 3,
        expected: &[0, 3],
    },
];

pub async fn read_absent_number<S: SettingsStore>(store: &S) {
    assert_eq!(store.number().await.unwrap(), None);
    assert_eq!(store.settings().await.unwrap(), None);
}

pub async fn increment_unconfigured<S: SettingsStore>(store: &S) {
    let err = store.increment().await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
    assert_eq!(store.number().await.unwrap(), None);
}

pub async fn set_settings<S: SettingsStore>(store: &S) {
    let settings = Settings {
        maximum: 100,
        step: 2,
    };
    store.set_settings(settings).await.unwrap();
    assert_eq!(store.settings().await.unwrap(), Some(settings));

    let updated = Settings {
        maximum: 50,
        step: 5,
    };
    store.set_settings(updated).await.unwrap();
    assert_eq!(store.settings().await.unwrap(), Some(updated));
}

/// Run a single increment sequence against an empty store.
pub async fn increment_sequence<S: SettingsStore>(store: &S, maximum: i64, step: i64) {
    store.set_settings(Settings { maximum, step }).await.unwrap();

    let mut expected = Some(step);
    loop {
        let actual = store.increment().await.unwrap();
        match expected.filter(|expected| *expected <= maximum) {
            Some(in_bounds) => {
                assert_eq!(actual, in_bounds, "maximum {maximum} step {step}");
                expected = in_bounds.checked_add(step);
            }
            None => {
                assert_eq!(actual, 0, "maximum {maximum} step {step}");
                break;
            }
        }
    }

    // After the reset the counting resumes from the step.
    if step <= maximum {
        assert_eq!(store.increment().await.unwrap(), step);
    }
}

/// Run the increments of a seeded boundary case against an empty store.
pub async fn increment_boundary<S: SettingsStore>(store: &S, case: &BoundaryCase) {
    let outcome = store
        .provision(Provision {
            settings: Settings {
                maximum: case.maximum,
                step: case.step,
            },
            value: case.value,
        })
        .await
        .unwrap();
    assert_eq!(outcome, ProvisionOutcome::Provisioned);

    for &expected in case.expected {
        assert_eq!(
            store.increment().await.unwrap(),
            expected,
            "maximum {} step {} value {}",
            case.maximum,
            case.step,
            case.value
        );
    }
    assert_eq!(store.number().await.unwrap(), case.expected.last().copied());
}

pub async fn increment_sequences<S, F>(mut new_store: F)
where
    S: SettingsStore,
    F: FnMut() -> S,
{
    for &(maximum, step) in SEQUENCE_CASES {
        increment_sequence(&new_store(), maximum, step).await;
    }
}

pub async fn provision_empty<S: SettingsStore>(store: &S) {
    let settings = Settings {
        maximum: 1000,
        step: 3,
    };
    let outcome = store
        .provision(Provision { settings, value: 4 })
        .await
        .unwrap();

    assert_eq!(outcome, ProvisionOutcome::Provisioned);
    assert_eq!(store.settings().await.unwrap(), Some(settings));
    assert_eq!(store.number().await.unwrap(), Some(4));
    assert_eq!(store.increment().await.unwrap(), 7);
}

pub async fn provision_configured<S: SettingsStore>(store: &S) {
    let settings = Settings {
        maximum: 10,
        step: 1,
    };
    store.set_settings(settings).await.unwrap();
    store.increment().await.unwrap();
    store.increment().await.unwrap();

    let outcome = store
        .provision(Provision {
            settings: Settings {
                maximum: 1000,
                step: 7,
            },
            value: 0,
        })
        .await
        .unwrap();

    assert_eq!(outcome, ProvisionOutcome::AlreadyProvisioned);
    assert_eq!(store.settings().await.unwrap(), Some(settings));
    assert_eq!(store.number().await.unwrap(), Some(2));
}

pub async fn concurrent_increments<S: SettingsStore + 'static>(store: S) {
    const TASKS: i64 = 32;
    const PER_TASK: i64 = 16;
    const STEP: i64 = 3;
    const INITIAL: i64 = 5;

    store
        .provision(Provision {
            settings: Settings {
                maximum: i64::MAX,
                step: STEP,
            },
            value: INITIAL,
        })
        .await
        .unwrap();

    let store = Arc::new(store);
    let handles = (0..TASKS).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let mut seen = Vec::with_capacity(PER_TASK as usize);
            for _ in 0..PER_TASK {
                seen.push(store.increment().await.unwrap());
            }
            seen
        })
    });

    let mut seen = HashSet::new();
    for result in futures::future::join_all(handles).await {
        for value in result.unwrap() {
            assert!(seen.insert(value), "value {value} returned twice");
        }
    }

    assert_eq!(seen.len() as i64, TASKS * PER_TASK);
    assert_eq!(
        store.number().await.unwrap(),
        Some(INITIAL + TASKS * PER_TASK * STEP)
    );
}

pub async fn concurrent_settings<S: SettingsStore + 'static>(store: S) {
    let first = Settings {
        maximum: 100,
        step: 1,
    };
    let second = Settings {
        maximum: 200,
        step: 2,
    };
    store.set_settings(first).await.unwrap();

    let store = Arc::new(store);

    let writer = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for i in 0..200 {
                let settings = if i % 2 == 0 { second } else { first };
                store.set_settings(settings).await.unwrap();
            }
        })
    };

    let readers = (0..4).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            for _ in 0..200 {
                let observed = store.settings().await.unwrap().unwrap();
                assert!(
                    observed == first || observed == second,
                    "torn settings observed: {observed:?}"
                );
                let value = store.increment().await.unwrap();
                assert!((0..=second.maximum).contains(&value));
            }
        })
    });

    writer.await.unwrap();
    for reader in futures::future::join_all(readers).await {
        reader.unwrap();
    }
}
