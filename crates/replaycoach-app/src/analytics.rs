//! 기본 경기 분석 구현.
//!
//! 모든 분석 차원에 고정 문구를 돌려준다. 실제 분석기로 교체할 때는
//! `MatchAnalytics`를 구현한 타입을 파이프라인에 넘기면 된다.

use replaycoach_core::config::CoachTone;
use replaycoach_core::models::profile::UserProfile;
use replaycoach_core::ports::analytics::{AnalysisContext, MatchAnalytics};

/// 고정 문구 분석기
#[derive(Debug, Clone, Copy, Default)]
pub struct StubAnalytics;

impl MatchAnalytics for StubAnalytics {
    fn playstyle(&self, _ctx: &AnalysisContext<'_>) -> String {
        "Aggressiveness: High\nPositioning: Needs improvement\nUlt Economy: Good".to_string()
    }

    fn training_focus(&self, _ctx: &AnalysisContext<'_>) -> String {
        "Focus on positioning and timing your engagements.".to_string()
    }

    fn compare_with_previous(&self, _ctx: &AnalysisContext<'_>) -> String {
        "Improved cover usage, but ult timing still needs work.".to_string()
    }

    fn coach_feedback(&self, _ctx: &AnalysisContext<'_>, tone: CoachTone) -> String {
        match tone {
            CoachTone::ToughLove => "Positioning needs immediate improvement.",
            CoachTone::Friendly => "Positioning adequate; refine timing.",
        }
        .to_string()
    }

    fn stat_progress(&self, _ctx: &AnalysisContext<'_>, stat_name: &str) -> String {
        format!("{stat_name} progress: Improved by 10% over the last 5 games.")
    }

    fn clip_summary(&self, _ctx: &AnalysisContext<'_>) -> String {
        "Summary: Focus on positioning and ult timing.".to_string()
    }

    fn hero_and_role(&self, _ctx: &AnalysisContext<'_>) -> String {
        "Role: DPS, Hero: Tracer".to_string()
    }

    fn tag_moments(&self, _ctx: &AnalysisContext<'_>) -> Vec<String> {
        vec![
            "00:01:23 - Kill".to_string(),
            "00:02:45 - Ult".to_string(),
            "00:03:10 - Mistake".to_string(),
        ]
    }

    fn skill_score(&self, _ctx: &AnalysisContext<'_>) -> u32 {
        85
    }

    fn weekly_report(&self, _profile: &UserProfile) -> String {
        "Weekly Report: Improved accuracy, but more deaths.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn with_ctx<R>(f: impl FnOnce(&AnalysisContext<'_>) -> R) -> R {
        let profile = UserProfile::new_default("u1");
        let ctx = AnalysisContext {
            user_id: "u1",
            source_path: Path::new("clip1.mp4"),
            advice: "Improve positioning",
            profile: &profile,
        };
        f(&ctx)
    }

    #[test]
    fn tone_switches_coach_feedback() {
        with_ctx(|ctx| {
            assert_eq!(
                StubAnalytics.coach_feedback(ctx, CoachTone::ToughLove),
                "Positioning needs immediate improvement."
            );
            assert_eq!(
                StubAnalytics.coach_feedback(ctx, CoachTone::Friendly),
                "Positioning adequate; refine timing."
            );
        });
    }

    #[test]
    fn analyze_clip_fills_every_field() {
        let analysis = with_ctx(|ctx| StubAnalytics.analyze_clip(ctx, CoachTone::Friendly));

        assert_eq!(analysis.skill_score, 85);
        assert_eq!(analysis.tagged_moments.len(), 3);
        assert_eq!(
            analysis.stat_progress,
            "accuracy progress: Improved by 10% over the last 5 games."
        );
        assert_eq!(analysis.hero_and_role, "Role: DPS, Hero: Tracer");
        assert!(analysis.playstyle_analysis.contains("Positioning"));
    }
}
