//! Async controller tests: scheduled fetches and stale-response handling

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use coach_common::events::EventBus;
use coach_common::{Insight, InsightRequest};
use coach_tutor::catalog::Catalog;
use coach_tutor::{InsightSource, TutorController};
use tokio::sync::Notify;

/// Answers immediately and records every request
#[derive(Default)]
struct RecordingSource {
    requests: Mutex<Vec<InsightRequest>>,
    calls: AtomicUsize,
}

#[async_trait]
impl InsightSource for RecordingSource {
    async fn fetch(&self, request: &InsightRequest) -> Insight {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Insight::new(
            format!("Position {}", request.fen),
            "Develop your pieces.",
            "Development",
        )
    }
}

/// Holds every response until released
#[derive(Default)]
struct GatedSource {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl InsightSource for GatedSource {
    async fn fetch(&self, _request: &InsightRequest) -> Insight {
        self.entered.notify_one();
        self.release.notified().await;
        Insight::new("late", "late", "late")
    }
}

fn controller(source: Option<Arc<dyn InsightSource>>, delay: Duration) -> TutorController {
    TutorController::initialize(
        Arc::new(Catalog::builtin()),
        EventBus::new(64),
        source,
        delay,
    )
    .unwrap()
}

#[tokio::test]
async fn test_initial_insight_is_fetched() {
    let source = Arc::new(RecordingSource::default());
    let controller = controller(Some(source.clone()), Duration::ZERO);

    controller.settle().await;

    let view = controller.view().await;
    assert!(!view.loading_insight);
    let insight = view.insight.expect("insight stored");
    assert_eq!(insight.tip, "Develop your pieces.");
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_rapid_navigation_fetches_only_latest_step() {
    let source = Arc::new(RecordingSource::default());
    let controller = controller(Some(source.clone()), Duration::from_millis(100));

    assert!(controller.next_step().await);
    assert!(controller.next_step().await);
    assert!(controller.next_step().await);
    controller.settle().await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    let requests = source.requests.lock().unwrap();
    assert_eq!(requests[0].move_san.as_deref(), Some("Nf3"));
    assert_eq!(requests[0].previous_move.as_deref(), Some("e5"));

    let view = controller.view().await;
    assert_eq!(view.step_index, 3);
    assert!(view.insight.is_some());
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let source = Arc::new(GatedSource::default());
    // Scheduled fetches never fire during this test
    let controller = controller(Some(source.clone()), Duration::from_secs(3600));

    let fetching = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.fetch_insight().await })
    };
    source.entered.notified().await;
    assert!(controller.view().await.loading_insight);

    // Learner moves on while the request is in flight
    assert!(controller.next_step().await);
    source.release.notify_one();

    assert!(!fetching.await.unwrap());
    let view = controller.view().await;
    assert_eq!(view.step_index, 1);
    assert!(view.insight.is_none());
    assert!(!view.loading_insight);
}

#[tokio::test]
async fn test_overlapping_fetches_stay_loading_until_both_finish() {
    let source = Arc::new(GatedSource::default());
    let controller = controller(Some(source.clone()), Duration::from_secs(3600));

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.fetch_insight().await })
    };
    source.entered.notified().await;
    let second = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.fetch_insight().await })
    };
    source.entered.notified().await;

    // Waiters are released in arrival order
    source.release.notify_one();
    assert!(first.await.unwrap());
    let view = controller.view().await;
    assert!(view.insight.is_some());
    assert!(view.loading_insight);

    source.release.notify_one();
    assert!(second.await.unwrap());
    assert!(!controller.view().await.loading_insight);
}

#[tokio::test]
async fn test_no_op_navigation_schedules_nothing() {
    let source = Arc::new(RecordingSource::default());
    let controller = controller(Some(source.clone()), Duration::ZERO);
    controller.settle().await;

    assert!(!controller.previous_step().await);
    assert!(!controller.select_tutorial("missing").await);
    controller.settle().await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_without_source_navigation_still_works() {
    let controller = controller(None, Duration::ZERO);

    assert!(!controller.insights_enabled());
    assert!(controller.go_to_step(4).await);
    assert!(!controller.fetch_insight().await);
    controller.settle().await;

    let view = controller.view().await;
    assert_eq!(view.step_index, 4);
    assert!(view.insight.is_none());
}
