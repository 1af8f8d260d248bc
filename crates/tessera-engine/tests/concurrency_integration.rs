#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

//! One authenticator interaction at a time: queue, reject, and cancellation.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{credential, GatedAuthenticator};
use tessera_crypto_core::Dictionary;
use tessera_engine::{BusyPolicy, FormattingStrategy, GenerationCoordinator, GenerationError};

fn gated(policy: BusyPolicy) -> (Arc<GenerationCoordinator<GatedAuthenticator>>, GatedAuthenticator) {
    let auth = GatedAuthenticator::default();
    let coordinator = GenerationCoordinator::new(auth.clone(), Dictionary::embedded().unwrap())
        .with_busy_policy(policy);
    (Arc::new(coordinator), auth)
}

fn spawn_generate(
    c: &Arc<GenerationCoordinator<GatedAuthenticator>>,
    service: &'static str,
) -> tokio::task::JoinHandle<Result<String, GenerationError>> {
    let c = Arc::clone(c);
    tokio::spawn(async move {
        c.generate(&credential(), service, 1, FormattingStrategy::Password)
            .await
            .map(|a| a.value.clone())
    })
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn reject_policy_reports_busy() {
    let (c, auth) = gated(BusyPolicy::Reject);

    let first = spawn_generate(&c, "example.com");
    auth.entered.notified().await;
    assert!(c.is_busy());

    let err = c
        .generate(&credential(), "github.com", 1, FormattingStrategy::Password)
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::Busy));
    assert!(err.is_retryable());
    assert_eq!(auth.calls(), 1);

    auth.release.add_permits(1);
    assert_eq!(first.await.unwrap().unwrap(), "CjCXLZa!ot3@UD?DB5[r");
    assert!(!c.is_busy());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn queue_policy_serializes_calls() {
    let (c, auth) = gated(BusyPolicy::Queue);

    let handles: Vec<_> = ["example.com", "github.com", "example.org", "mail.example.com"]
        .into_iter()
        .map(|s| spawn_generate(&c, s))
        .collect();
    auth.release.add_permits(handles.len());

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(auth.calls(), 4);
    assert_eq!(auth.max_active(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn queued_call_waits_for_the_first() {
    let (c, auth) = gated(BusyPolicy::Queue);

    let first = spawn_generate(&c, "example.com");
    auth.entered.notified().await;
    let second = spawn_generate(&c, "github.com");

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(auth.calls(), 1);
    assert!(!second.is_finished());

    auth.release.add_permits(2);
    assert_eq!(first.await.unwrap().unwrap(), "CjCXLZa!ot3@UD?DB5[r");
    assert_eq!(second.await.unwrap().unwrap(), "3uwI8NBVBZHU@wl;Bf5T");
    assert_eq!(auth.max_active(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn dropped_call_releases_the_lock() {
    let (c, auth) = gated(BusyPolicy::Reject);

    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        c.generate(&credential(), "example.com", 1, FormattingStrategy::Password),
    )
    .await;
    assert!(abandoned.is_err());
    assert!(!c.is_busy());

    auth.release.add_permits(1);
    let artifact = c
        .generate(&credential(), "example.com", 1, FormattingStrategy::Password)
        .await
        .unwrap();
    assert_eq!(artifact.value, "CjCXLZa!ot3@UD?DB5[r");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn aborted_task_releases_the_lock() {
    let (c, auth) = gated(BusyPolicy::Reject);

    let task = spawn_generate(&c, "example.com");
    auth.entered.notified().await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert!(!c.is_busy());

    auth.release.add_permits(1);
    spawn_generate(&c, "github.com").await.unwrap().unwrap();
}
