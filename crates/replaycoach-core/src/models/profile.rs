//! 사용자 프로필 모델.
//!
//! 프로필 문서는 `user_id → UserProfile` 매핑 하나로 구성된 JSON 문서다.
//! `user_id`가 유일한 조회 키이며, 이력은 추가만 가능하다.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::history::HistoryEntry;

/// 프로필 문서 전체 (`user_id` → 프로필)
pub type ProfileDocument = BTreeMap<String, UserProfile>;

/// 승/패 기록
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32,
}

/// 사용자 프로필
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// 사용자 식별자 (문서 키와 동일)
    pub user_id: String,
    /// 표시 이름
    #[serde(default = "default_name")]
    pub name: String,
    /// 랭크
    #[serde(default = "default_rank")]
    pub rank: String,
    #[serde(default)]
    pub preferred_roles: Vec<String>,
    #[serde(default)]
    pub best_heroes: Vec<String>,
    #[serde(default, rename = "win_loss_stats")]
    pub win_loss: WinLoss,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    /// 마지막 처리 시각
    #[serde(default, with = "super::timestamp::option")]
    pub last_seen: Option<DateTime<Utc>>,
    /// 처리 이력 (추가 전용)
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl UserProfile {
    /// 처음 보는 사용자의 기본 프로필
    pub fn new_default(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: default_name(),
            rank: default_rank(),
            preferred_roles: Vec::new(),
            best_heroes: Vec::new(),
            win_loss: WinLoss::default(),
            improvement_areas: Vec::new(),
            last_seen: None,
            history: Vec::new(),
        }
    }

    /// 이력 항목 추가 + 마지막 처리 시각 갱신
    pub fn record(&mut self, entry: HistoryEntry) {
        self.last_seen = Some(entry.timestamp());
        self.history.push(entry);
    }

    /// 콘솔 출력용 플레이어 요약
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("Player: {}\n", self.name));
        summary.push_str(&format!("Rank: {}\n", self.rank));
        summary.push_str(&format!("Best Heroes: {}\n", join_or_none(&self.best_heroes)));
        summary.push_str(&format!(
            "Win/Loss: {}/{}\n",
            self.win_loss.wins, self.win_loss.losses
        ));
        summary.push_str(&format!(
            "Improvement Areas: {}\n",
            join_or_none(&self.improvement_areas)
        ));
        summary.push_str(&format!("Processed Files: {}\n", self.history.len()));
        summary
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn default_name() -> String {
    "Player".to_string()
}

fn default_rank() -> String {
    "Unknown".to_string()
}
