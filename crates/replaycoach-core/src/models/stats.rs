//! 스코어보드 스탯 모델.
//!
//! OCR 텍스트에서 추출한 고정 스탯 집합과,
//! 스코어보드 읽기 결과(성공/실패)를 표현하는 명시적 결과 타입.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 값을 찾지 못한 스탯의 직렬화 표현
pub const NOT_AVAILABLE: &str = "N/A";

/// 추출 대상 스탯 (선언 순서가 곧 출력 순서)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Kills,
    Deaths,
    Assists,
    #[serde(rename = "Healing Done")]
    HealingDone,
    Accuracy,
    #[serde(rename = "Final Blows")]
    FinalBlows,
}

impl StatKind {
    /// 전체 스탯 목록 (출력 순서)
    pub const ALL: [StatKind; 6] = [
        StatKind::Kills,
        StatKind::Deaths,
        StatKind::Assists,
        StatKind::HealingDone,
        StatKind::Accuracy,
        StatKind::FinalBlows,
    ];

    /// 스코어보드/프롬프트에 쓰이는 라벨
    pub fn label(self) -> &'static str {
        match self {
            Self::Kills => "Kills",
            Self::Deaths => "Deaths",
            Self::Assists => "Assists",
            Self::HealingDone => "Healing Done",
            Self::Accuracy => "Accuracy",
            Self::FinalBlows => "Final Blows",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 스탯 값: 숫자(또는 백분율) 문자열이거나 "N/A"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatValue {
    /// 추출된 원문 값 (예: "12", "43.5%")
    Value(String),
    /// 텍스트에서 찾지 못함
    NotAvailable,
}

impl StatValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Value(v) => v,
            Self::NotAvailable => NOT_AVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

impl From<String> for StatValue {
    fn from(raw: String) -> Self {
        if raw == NOT_AVAILABLE {
            Self::NotAvailable
        } else {
            Self::Value(raw)
        }
    }
}

impl From<StatValue> for String {
    fn from(value: StatValue) -> Self {
        match value {
            StatValue::Value(v) => v,
            StatValue::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 이미지 한 장에서 새로 추출한 스탯 (이전 값과 병합하지 않음)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedStats(BTreeMap<StatKind, StatValue>);

impl ExtractedStats {
    /// 빈 스탯 (추출 실패 시 이력에 기록)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: StatKind, value: StatValue) {
        self.0.insert(kind, value);
    }

    pub fn get(&self, kind: StatKind) -> Option<&StatValue> {
        self.0.get(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKind, &StatValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(StatKind, StatValue)> for ExtractedStats {
    fn from_iter<I: IntoIterator<Item = (StatKind, StatValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 스코어보드 읽기 결과
///
/// OCR/디코딩 실패를 예외 대신 값으로 전달한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreboardScan {
    /// OCR + 스탯 추출 성공
    Extracted(ExtractedStats),
    /// 파일 읽기, 이미지 디코딩 또는 OCR 실패
    Failed {
        /// 실패 사유 (로그/진단용)
        reason: String,
    },
}

impl ScoreboardScan {
    pub fn stats(&self) -> Option<&ExtractedStats> {
        match self {
            Self::Extracted(stats) => Some(stats),
            Self::Failed { .. } => None,
        }
    }

    /// 이력 기록용: 실패 시 빈 스탯
    pub fn into_stats_or_empty(self) -> ExtractedStats {
        match self {
            Self::Extracted(stats) => stats,
            Self::Failed { .. } => ExtractedStats::empty(),
        }
    }
}
