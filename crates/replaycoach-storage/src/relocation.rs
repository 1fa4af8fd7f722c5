//! 처리 완료 파일 이동.
//!
//! 원본 파일을 목적지 폴더로 옮긴다. 같은 이름의 파일이 있으면
//! `CollisionPolicy`에 따라 덮어쓰기 / 접미사 붙이기 / 거부한다.
//! 다른 파일 시스템 사이의 이동은 복사 후 삭제로 대체한다.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use replaycoach_core::config::CollisionPolicy;
use replaycoach_core::error::CoreError;

/// 접미사 탐색 상한
const MAX_SUFFIX: u32 = 10_000;

/// `source`를 `destination_dir`로 이동하고 최종 경로를 반환
pub async fn relocate(
    source: &Path,
    destination_dir: &Path,
    policy: CollisionPolicy,
) -> Result<PathBuf, CoreError> {
    let file_name = source.file_name().ok_or_else(|| CoreError::Validation {
        field: "source".to_string(),
        message: format!("파일 이름 없음: {}", source.display()),
    })?;

    fs::create_dir_all(destination_dir).await?;
    let target = resolve_target(&destination_dir.join(file_name), policy).await?;

    move_file(source, &target).await?;
    info!(from = %source.display(), to = %target.display(), "파일 이동 완료");
    Ok(target)
}

async fn resolve_target(candidate: &Path, policy: CollisionPolicy) -> Result<PathBuf, CoreError> {
    if !fs::try_exists(candidate).await? {
        return Ok(candidate.to_path_buf());
    }

    match policy {
        CollisionPolicy::Overwrite => {
            debug!(target = %candidate.display(), "기존 파일 덮어쓰기");
            Ok(candidate.to_path_buf())
        }
        CollisionPolicy::Reject => Err(CoreError::RelocationConflict(candidate.to_path_buf())),
        CollisionPolicy::RenameWithSuffix => {
            let stem = candidate
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let ext = candidate
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();

            for n in 1..=MAX_SUFFIX {
                let alt = candidate.with_file_name(format!("{stem}-{n}{ext}"));
                if !fs::try_exists(&alt).await? {
                    return Ok(alt);
                }
            }
            Err(CoreError::RelocationConflict(candidate.to_path_buf()))
        }
    }
}

async fn move_file(source: &Path, target: &Path) -> Result<(), CoreError> {
    match fs::rename(source, target).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(e.into()),
        Err(e) => {
            // 장치 간 이동 (EXDEV 등)
            warn!(from = %source.display(), "rename 실패, 복사 후 삭제로 대체: {e}");
            fs::copy(source, target).await?;
            fs::remove_file(source).await?;
            Ok(())
        }
    }
}
