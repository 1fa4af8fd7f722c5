//! 프로필 이력 항목.
//!
//! 처리된 파일 하나당 하나의 불변 항목이 프로필 이력 끝에 추가된다.
//! JSON 표현은 `clip_path` / `image_path` 키로 변형을 구분한다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::ExtractedStats;

/// 이력 항목 (클립 또는 스코어보드 이미지)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryEntry {
    /// 게임플레이 클립 분석 결과
    Clip(ClipEntry),
    /// 스코어보드 이미지 분석 결과
    Image(ImageEntry),
}

/// 클립 이력 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipEntry {
    /// 원본 파일 경로 (처리 시점 기준)
    pub clip_path: String,
    /// 처리 시각
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// 코칭 모델 응답 (에러 문자열일 수 있음)
    pub ai_feedback: String,
    /// 분석 기능별 결과
    #[serde(flatten)]
    pub analysis: ClipAnalysis,
}

/// 클립 분석 결과 묶음: `MatchAnalytics` 구현체가 채운다
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipAnalysis {
    pub playstyle_analysis: String,
    pub training_focus: String,
    pub comparison: String,
    pub coach_feedback: String,
    pub stat_progress: String,
    pub clip_summary: String,
    pub hero_and_role: String,
    pub tagged_moments: Vec<String>,
    pub skill_score: u32,
}

/// 스코어보드 이미지 이력 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// 원본 파일 경로 (처리 시점 기준)
    pub image_path: String,
    /// 처리 시각
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    /// 코칭 모델 응답 (에러 문자열일 수 있음)
    pub ai_feedback: String,
    /// 추출 스탯 (OCR 실패 시 빈 맵)
    pub stats: ExtractedStats,
}

impl HistoryEntry {
    pub fn source_path(&self) -> &str {
        match self {
            Self::Clip(e) => &e.clip_path,
            Self::Image(e) => &e.image_path,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Clip(e) => e.timestamp,
            Self::Image(e) => e.timestamp,
        }
    }

    pub fn ai_feedback(&self) -> &str {
        match self {
            Self::Clip(e) => &e.ai_feedback,
            Self::Image(e) => &e.ai_feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::{StatKind, StatValue};

    fn sample_analysis() -> ClipAnalysis {
        ClipAnalysis {
            playstyle_analysis: "Aggressiveness: High".into(),
            training_focus: "Focus on positioning".into(),
            comparison: "Improved cover usage".into(),
            coach_feedback: "Positioning adequate".into(),
            stat_progress: "accuracy progress".into(),
            clip_summary: "Summary".into(),
            hero_and_role: "Role: DPS, Hero: Tracer".into(),
            tagged_moments: vec!["00:01:23 - Kill".into()],
            skill_score: 85,
        }
    }

    #[test]
    fn clip_entry_uses_flat_legacy_keys() {
        let entry = HistoryEntry::Clip(ClipEntry {
            clip_path: "clip1.mp4".into(),
            timestamp: Utc::now(),
            ai_feedback: "Improve positioning".into(),
            analysis: sample_analysis(),
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["clip_path"], "clip1.mp4");
        assert_eq!(value["skill_score"], 85);
        assert!(value.get("analysis").is_none());

        let back: HistoryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back.source_path(), "clip1.mp4");
        assert!(matches!(back, HistoryEntry::Clip(_)));
    }

    #[test]
    fn image_entry_roundtrip() {
        let stats = [(StatKind::Kills, StatValue::Value("12".into()))]
            .into_iter()
            .collect();
        let entry = HistoryEntry::Image(ImageEntry {
            image_path: "score1.png".into(),
            timestamp: Utc::now(),
            ai_feedback: "advice".into(),
            stats,
        });
        let json = serde_json::to_string(&entry).unwrap();
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn reads_legacy_image_entry() {
        let json = r#"{
            "image_path": "E:\\clips\\score.png",
            "timestamp": "2025-06-01 21:04:11",
            "ai_feedback": "[Model Error 500] boom",
            "stats": {}
        }"#;
        let entry: HistoryEntry = serde_json::from_str(json).unwrap();
        match entry {
            HistoryEntry::Image(img) => {
                assert!(img.stats.is_empty());
                assert!(img.ai_feedback.starts_with("[Model Error 500]"));
            }
            HistoryEntry::Clip(_) => panic!("이미지 항목이어야 함"),
        }
    }
}
