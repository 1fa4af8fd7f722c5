//! # replaycoach
//!
//! 게임플레이 클립/스코어보드 코칭 파이프라인 바이너리 진입점.
//! 설정 로드, CLI 오버라이드, 의존성 조립, 폴더 감시 실행.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use replaycoach_app::analytics::StubAnalytics;
use replaycoach_app::lifecycle::LifecycleManager;
use replaycoach_app::pipeline::ProcessOutcome;
use replaycoach_app::watcher::WatchService;
use replaycoach_app::wiring;
use replaycoach_core::config::AppConfig;
use replaycoach_core::config_manager::{ConfigManager, CONFIG_FILE_NAME};
use replaycoach_core::ports::analytics::MatchAnalytics;
use replaycoach_core::ports::profile_store::ProfileStore;
use replaycoach_storage::profile_store::JsonProfileStore;

/// 게임플레이 클립/스코어보드 코칭 도우미
#[derive(Parser, Debug)]
#[command(name = "replaycoach")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 감시 폴더
    #[arg(long, global = true)]
    watch_dir: Option<PathBuf>,

    /// 처리 완료 폴더 (피드백, 프로필 문서 포함)
    #[arg(long, global = true)]
    destination: Option<PathBuf>,

    /// 코칭 모델 엔드포인트
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// 코칭 모델 이름
    #[arg(long, global = true)]
    model: Option<String>,

    /// 정착 대기 시간 (밀리초)
    #[arg(long, global = true)]
    settle_delay_ms: Option<u64>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 감시 폴더를 지켜보며 새 파일 처리 (기본)
    Watch,
    /// 파일 하나를 즉시 처리
    Process {
        /// 처리할 클립 또는 스코어보드 이미지
        file: PathBuf,
    },
    /// 플레이어 요약과 주간 리포트 출력
    Summary {
        /// 사용자 ID (기본: 설정의 default_user_id)
        #[arg(long)]
        user: Option<String>,
    },
}

/// 설정 파일 경로 결정 (CLI 인자 또는 플랫폼별 기본 경로)
fn resolve_config_path(cli: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = cli {
        return Ok(path.to_path_buf());
    }
    let dirs = ProjectDirs::from("com", "replaycoach", "replaycoach")
        .ok_or_else(|| anyhow!("설정 디렉토리를 결정할 수 없습니다 (--config로 지정)"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// 설정 로드 + CLI 오버라이드
fn load_config(args: &Args) -> Result<AppConfig> {
    let config_path = resolve_config_path(args.config.as_deref())?;
    let manager = ConfigManager::with_path(config_path)
        .map_err(|e| anyhow!("설정 로드 실패: {e}"))?;
    info!("설정 파일: {}", manager.config_path().display());

    let mut config = manager.get();
    if let Some(dir) = &args.watch_dir {
        config.watch.watch_dir = dir.clone();
    }
    if let Some(dir) = &args.destination {
        config.watch.destination_dir = dir.clone();
    }
    if let Some(endpoint) = &args.endpoint {
        config.model.endpoint = endpoint.clone();
    }
    if let Some(model) = &args.model {
        config.model.model = model.clone();
    }
    if let Some(delay) = args.settle_delay_ms {
        config.watch.settle_delay_ms = delay;
    }
    config.validate().map_err(|e| anyhow!("설정 검증 실패: {e}"))?;
    Ok(config)
}

/// 감시 폴더 확인 + 목적지 생성 후 절대 경로로 정규화
fn prepare_directories(config: &mut AppConfig) -> Result<()> {
    let watch_dir = &config.watch.watch_dir;
    if !watch_dir.is_dir() {
        bail!("감시 폴더가 존재하지 않습니다: {}", watch_dir.display());
    }
    config.watch.watch_dir = watch_dir
        .canonicalize()
        .with_context(|| format!("감시 폴더 경로 확인 실패: {}", watch_dir.display()))?;

    let destination = &config.watch.destination_dir;
    std::fs::create_dir_all(destination)
        .with_context(|| format!("처리 완료 폴더 생성 실패: {}", destination.display()))?;
    config.watch.destination_dir = destination
        .canonicalize()
        .with_context(|| format!("처리 완료 폴더 경로 확인 실패: {}", destination.display()))?;
    Ok(())
}

async fn run_watch(mut config: AppConfig) -> Result<()> {
    prepare_directories(&mut config)?;
    info!(
        watch_dir = %config.watch.watch_dir.display(),
        destination = %config.watch.destination_dir.display(),
        endpoint = %config.model.endpoint,
        "replaycoach 감시 모드 시작"
    );

    let pipeline = Arc::new(wiring::build_pipeline(&config)?);
    let service = WatchService::new(config.watch.clone(), pipeline);

    let lifecycle = Arc::new(LifecycleManager::new());
    let shutdown_rx = lifecycle.subscribe();
    let signal_lifecycle = lifecycle.clone();
    tokio::spawn(async move {
        signal_lifecycle.wait_for_signal().await;
    });

    service.run(shutdown_rx).await?;
    info!("replaycoach 종료");
    Ok(())
}

async fn run_process(mut config: AppConfig, file: PathBuf) -> Result<()> {
    if !file.is_file() {
        bail!("파일이 존재하지 않습니다: {}", file.display());
    }
    let kind = config
        .watch
        .classify(&file)
        .ok_or_else(|| anyhow!("지원하지 않는 확장자: {}", file.display()))?;

    std::fs::create_dir_all(&config.watch.destination_dir).with_context(|| {
        format!(
            "처리 완료 폴더 생성 실패: {}",
            config.watch.destination_dir.display()
        )
    })?;
    if let Ok(watch_dir) = config.watch.watch_dir.canonicalize() {
        config.watch.watch_dir = watch_dir;
    }
    let file = file.canonicalize().unwrap_or(file);

    let pipeline = wiring::build_pipeline(&config)?;
    match pipeline.process(&file, kind).await {
        ProcessOutcome::Relocated { destination } => {
            println!("처리 완료: {}", destination.display());
            Ok(())
        }
        ProcessOutcome::Processed => {
            println!("처리 완료 (원본 없음): {}", file.display());
            Ok(())
        }
        ProcessOutcome::Failed { reason } => bail!("처리 실패: {reason}"),
    }
}

async fn run_summary(config: AppConfig, user: Option<String>) -> Result<()> {
    let user_id = user.unwrap_or_else(|| config.user.default_user_id.clone());
    let store = JsonProfileStore::new(config.profile_path());
    let profile = store.load_one(&user_id).await?;

    print!("{}", profile.summary());
    println!("{}", StubAnalytics.weekly_report(&profile));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "replaycoach={lvl},replaycoach_app={lvl},replaycoach_core={lvl},replaycoach_vision={lvl},replaycoach_network={lvl},replaycoach_storage={lvl}",
        lvl = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config = load_config(&args)?;

    let result = match args.command.unwrap_or(Command::Watch) {
        Command::Watch => run_watch(config).await,
        Command::Process { file } => run_process(config, file).await,
        Command::Summary { user } => run_summary(config, user).await,
    };

    if let Err(e) = &result {
        error!("{e:#}");
    }
    result
}
