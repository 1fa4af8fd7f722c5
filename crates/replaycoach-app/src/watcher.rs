//! 감시 폴더 서비스.
//!
//! `notify` 콜백은 이벤트를 채널로 넘기기만 하고, 분류/정착 대기/처리는
//! tokio 태스크에서 진행한다. 정착 대기는 경로별 타이머로 구현되어
//! 같은 경로에 이벤트가 다시 오면 타이머가 재시작되고 한 번만 처리된다.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use notify::event::CreateKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use replaycoach_core::config::WatchConfig;
use replaycoach_core::error::CoreError;
use replaycoach_core::models::ingest::FileKind;

use crate::pipeline::IngestPipeline;

// ============================================================
// FileHandler: 정착이 끝난 파일을 받는 쪽
// ============================================================

/// 정착 완료 파일 처리기
#[async_trait]
pub trait FileHandler: Send + Sync {
    async fn handle(&self, path: PathBuf, kind: FileKind);
}

#[async_trait]
impl FileHandler for IngestPipeline {
    async fn handle(&self, path: PathBuf, kind: FileKind) {
        self.process(&path, kind).await;
    }
}

// ============================================================
// SettleScheduler: 경로별 디바운스
// ============================================================

/// 경로별 정착 대기 스케줄러
pub struct SettleScheduler {
    delay: Duration,
    handler: Arc<dyn FileHandler>,
    /// 경로 → 최신 세대 번호
    pending: Arc<Mutex<HashMap<PathBuf, u64>>>,
    next_generation: u64,
    tasks: JoinSet<()>,
}

impl SettleScheduler {
    pub fn new(delay: Duration, handler: Arc<dyn FileHandler>) -> Self {
        Self {
            delay,
            handler,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: 0,
            tasks: JoinSet::new(),
        }
    }

    /// 정착 타이머 시작 (이미 대기 중이면 재시작)
    pub fn schedule(&mut self, path: PathBuf, kind: FileKind) {
        self.next_generation += 1;
        let generation = self.next_generation;

        let restarted = self.pending.lock().insert(path.clone(), generation).is_some();
        if restarted {
            debug!(path = %path.display(), "정착 타이머 재시작");
        } else {
            debug!(path = %path.display(), delay_ms = self.delay.as_millis() as u64, "정착 대기 시작");
        }

        let pending = self.pending.clone();
        let handler = self.handler.clone();
        let delay = self.delay;
        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut pending = pending.lock();
                if pending.get(&path) != Some(&generation) {
                    return;
                }
                pending.remove(&path);
            }
            debug!(path = %path.display(), "정착 완료");
            handler.handle(path, kind).await;
        });

        self.reap_finished();
    }

    /// 대기 또는 처리 중인 태스크 수
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// 모든 태스크 완료까지 대기 (중단하지 않음)
    pub async fn drain(mut self) {
        while let Some(result) = self.tasks.join_next().await {
            if let Err(e) = result {
                error!("파일 처리 태스크 비정상 종료: {e}");
            }
        }
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(e) = result {
                error!("파일 처리 태스크 비정상 종료: {e}");
            }
        }
    }
}

// ============================================================
// WatchService
// ============================================================

/// 감시 폴더 서비스
pub struct WatchService {
    config: WatchConfig,
    handler: Arc<dyn FileHandler>,
}

impl WatchService {
    pub fn new(config: WatchConfig, handler: Arc<dyn FileHandler>) -> Self {
        Self { config, handler }
    }

    /// 종료 신호까지 감시. 종료 후에는 새 이벤트를 받지 않고 진행 중 작업만 기다린다.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), CoreError> {
        let root = &self.config.watch_dir;
        if !root.is_dir() {
            return Err(CoreError::NotFound {
                resource_type: "WatchDir".to_string(),
                id: root.display().to_string(),
            });
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })
        .map_err(|e| CoreError::Internal(format!("파일 감시자 생성 실패: {e}")))?;
        watcher
            .watch(root, RecursiveMode::NonRecursive)
            .map_err(|e| CoreError::Internal(format!("폴더 감시 등록 실패: {e}")))?;

        info!(root = %root.display(), "폴더 감시 시작");
        let mut scheduler = SettleScheduler::new(self.config.settle_delay(), self.handler.clone());

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                event = rx.recv() => match event {
                    Some(Ok(event)) => self.on_event(event, &mut scheduler),
                    Some(Err(e)) => warn!("파일 감시 이벤트 에러: {e}"),
                    None => break,
                },
            }
        }

        drop(watcher);
        info!(in_flight = scheduler.in_flight(), "폴더 감시 중지, 진행 중 작업 대기");
        scheduler.drain().await;
        info!("폴더 감시 종료");
        Ok(())
    }

    fn on_event(&self, event: Event, scheduler: &mut SettleScheduler) {
        if !matches!(
            event.kind,
            EventKind::Create(CreateKind::File) | EventKind::Create(CreateKind::Any)
        ) {
            return;
        }

        for path in event.paths {
            if path.is_dir() {
                continue;
            }
            match self.config.classify(&path) {
                Some(kind) => {
                    info!(path = %path.display(), kind = %kind, "새 파일 감지");
                    scheduler.schedule(path, kind);
                }
                None => info!(path = %path.display(), "지원하지 않는 확장자, 무시"),
            }
        }
    }
}
