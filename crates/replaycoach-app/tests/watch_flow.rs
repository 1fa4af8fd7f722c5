//! 폴더 감시 통합 테스트.
//!
//! 실제 `notify` 감시자로 파일 생성 → 정착 대기 → 처리 → 이동까지 확인한다.

mod common;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use common::{FakeOcr, FixedAdviceModel, Workspace};
use replaycoach_app::lifecycle::LifecycleManager;
use replaycoach_app::watcher::WatchService;

async fn wait_until_exists(path: &Path, timeout: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    path.exists()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn watched_clip_is_processed_and_other_files_ignored() {
    let ws = Workspace::new();
    let pipeline = Arc::new(ws.pipeline(FakeOcr::text(""), FixedAdviceModel::new("Improve positioning")));
    let service = WatchService::new(ws.config.watch.clone(), pipeline);

    let lifecycle = LifecycleManager::new();
    let shutdown_rx = lifecycle.subscribe();
    let run = tokio::spawn(async move { service.run(shutdown_rx).await });

    // 감시자 등록 대기
    tokio::time::sleep(Duration::from_millis(500)).await;
    ws.drop_file("notes.txt", b"not a clip");
    ws.drop_file("clip1.mp4", b"video");

    assert!(
        wait_until_exists(&ws.processed.join("clip1.mp4"), Duration::from_secs(10)).await,
        "clip1.mp4가 목적지로 이동해야 함"
    );

    lifecycle.shutdown();
    let result = tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());

    assert!(ws.incoming.join("notes.txt").exists());
    assert!(!ws.incoming.join("clip1.mp4").exists());
    assert_eq!(ws.profiles()["default_user"].history.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_waits_for_settling_file() {
    let mut ws = Workspace::new();
    ws.config.watch.settle_delay_ms = 1_000;
    let pipeline = Arc::new(ws.pipeline(FakeOcr::text("Kills: 4"), FixedAdviceModel::new("ok")));
    let service = WatchService::new(ws.config.watch.clone(), pipeline);

    let lifecycle = LifecycleManager::new();
    let shutdown_rx = lifecycle.subscribe();
    let run = tokio::spawn(async move { service.run(shutdown_rx).await });

    tokio::time::sleep(Duration::from_millis(500)).await;
    ws.drop_file("score1.png", b"png");
    // 이벤트가 전달되어 정착 대기에 들어갈 시간
    tokio::time::sleep(Duration::from_millis(300)).await;

    lifecycle.shutdown();
    tokio::time::timeout(Duration::from_secs(10), run)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    // 종료 전에 대기 중이던 파일은 중단되지 않고 처리된다
    assert!(ws.processed.join("score1.png").exists());
}
