//! 스코어보드 스탯 추출.
//!
//! OCR 원문에서 고정된 스탯 6종을 정규식으로 찾는다.
//! 각 패턴은 대소문자를 무시하고, 라벨 뒤의 공백과 `:`/`-` 구분자를 허용한다.
//! 첫 번째 매치만 사용하며, 찾지 못한 스탯은 `N/A`로 남는다.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use replaycoach_core::models::stats::{ExtractedStats, StatKind, StatValue};

/// 스탯별 패턴 (프로세스 전체에서 한 번만 컴파일)
static STAT_PATTERNS: Lazy<Vec<(StatKind, Regex)>> = Lazy::new(|| {
    StatKind::ALL
        .iter()
        .filter_map(|&kind| match Regex::new(pattern_for(kind)) {
            Ok(re) => Some((kind, re)),
            Err(e) => {
                tracing::error!(stat = %kind, "스탯 패턴 컴파일 실패: {e}");
                None
            }
        })
        .collect()
});

fn pattern_for(kind: StatKind) -> &'static str {
    match kind {
        StatKind::Kills => r"(?i)Kills?\s*[:\-]?\s*(\d+)",
        StatKind::Deaths => r"(?i)Deaths?\s*[:\-]?\s*(\d+)",
        StatKind::Assists => r"(?i)Assists?\s*[:\-]?\s*(\d+)",
        StatKind::HealingDone => r"(?i)Healing\s*Done\s*[:\-]?\s*(\d+)",
        StatKind::Accuracy => r"(?i)Accuracy\s*[:\-]?\s*([\d.]+%)",
        StatKind::FinalBlows => r"(?i)Final\s*Blows\s*[:\-]?\s*(\d+)",
    }
}

/// OCR 텍스트에서 스탯 추출
///
/// 결과에는 항상 6개 키가 모두 들어 있다.
pub fn extract(raw_text: &str) -> ExtractedStats {
    let stats: ExtractedStats = STAT_PATTERNS
        .iter()
        .map(|(kind, re)| {
            let value = re
                .captures(raw_text)
                .and_then(|caps| caps.get(1))
                .map(|m| StatValue::Value(m.as_str().to_string()))
                .unwrap_or(StatValue::NotAvailable);
            (*kind, value)
        })
        .collect();

    debug!(
        found = stats.iter().filter(|(_, v)| v.is_available()).count(),
        "스탯 추출 완료"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(stats: &ExtractedStats, kind: StatKind) -> &str {
        stats.get(kind).map(|v| v.as_str()).unwrap_or("<missing>")
    }

    #[test]
    fn extracts_all_stats_from_scoreboard_text() {
        let text = "KILLS: 21\nDeaths - 4\nAssists 9\nHealing Done: 3400\nAccuracy: 43.5%\nFinal Blows: 11";
        let stats = extract(text);

        assert_eq!(value(&stats, StatKind::Kills), "21");
        assert_eq!(value(&stats, StatKind::Deaths), "4");
        assert_eq!(value(&stats, StatKind::Assists), "9");
        assert_eq!(value(&stats, StatKind::HealingDone), "3400");
        assert_eq!(value(&stats, StatKind::Accuracy), "43.5%");
        assert_eq!(value(&stats, StatKind::FinalBlows), "11");
    }

    #[test]
    fn missing_stats_are_not_available() {
        let stats = extract("Kills: 12 Deaths: 3");

        assert_eq!(stats.len(), 6);
        assert_eq!(value(&stats, StatKind::Kills), "12");
        assert_eq!(value(&stats, StatKind::Deaths), "3");
        assert_eq!(stats.get(StatKind::Assists), Some(&StatValue::NotAvailable));
        assert_eq!(value(&stats, StatKind::HealingDone), "N/A");
        assert_eq!(value(&stats, StatKind::Accuracy), "N/A");
        assert_eq!(value(&stats, StatKind::FinalBlows), "N/A");
    }

    #[test]
    fn singular_label_and_no_separator() {
        let stats = extract("kill 7 death 2 assist 1");
        assert_eq!(value(&stats, StatKind::Kills), "7");
        assert_eq!(value(&stats, StatKind::Deaths), "2");
        assert_eq!(value(&stats, StatKind::Assists), "1");
    }

    #[test]
    fn accuracy_requires_percent_sign() {
        let stats = extract("Accuracy: 43");
        assert_eq!(value(&stats, StatKind::Accuracy), "N/A");
    }

    #[test]
    fn first_match_wins() {
        let stats = extract("Kills: 5\nKills: 9");
        assert_eq!(value(&stats, StatKind::Kills), "5");
    }

    #[test]
    fn empty_text_yields_all_not_available() {
        let stats = extract("");
        assert_eq!(stats.len(), 6);
        assert!(stats.iter().all(|(_, v)| !v.is_available()));
    }
}
