//! 경기 분석 포트.
//!
//! 분석 차원(플레이스타일, 훈련 포커스, 비교, 톤별 피드백, 스탯 추이,
//! 클립 요약, 영웅/역할, 주요 순간, 스킬 점수, 주간 리포트)마다 메서드 하나.
//! 기본 구현(`StubAnalytics`)은 고정 문자열을 반환하며,
//! 실제 구현으로 교체해도 파이프라인은 수정할 필요가 없다.

use std::path::Path;

use crate::config::CoachTone;
use crate::models::history::ClipAnalysis;
use crate::models::profile::UserProfile;

/// 분석 입력 컨텍스트
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// 대상 사용자
    pub user_id: &'a str,
    /// 원본 파일 경로
    pub source_path: &'a Path,
    /// 코칭 모델 응답
    pub advice: &'a str,
    /// 처리 직전의 프로필
    pub profile: &'a UserProfile,
}

/// 경기 분석 기능 집합
pub trait MatchAnalytics: Send + Sync {
    /// 플레이 패턴 요약
    fn playstyle(&self, ctx: &AnalysisContext<'_>) -> String;

    /// 최근 실수 기반 훈련 추천
    fn training_focus(&self, ctx: &AnalysisContext<'_>) -> String;

    /// 직전 경기와 비교
    fn compare_with_previous(&self, ctx: &AnalysisContext<'_>) -> String;

    /// 톤별 코치 피드백
    fn coach_feedback(&self, ctx: &AnalysisContext<'_>, tone: CoachTone) -> String;

    /// 특정 스탯의 추이
    fn stat_progress(&self, ctx: &AnalysisContext<'_>, stat_name: &str) -> String;

    /// 모델 응답 요약
    fn clip_summary(&self, ctx: &AnalysisContext<'_>) -> String;

    /// 플레이한 영웅/역할 식별
    fn hero_and_role(&self, ctx: &AnalysisContext<'_>) -> String;

    /// 주요 순간 태깅 ("mm:ss - 이벤트")
    fn tag_moments(&self, ctx: &AnalysisContext<'_>) -> Vec<String>;

    /// 경기 스킬 점수
    fn skill_score(&self, ctx: &AnalysisContext<'_>) -> u32;

    /// 주간 성과 리포트
    fn weekly_report(&self, profile: &UserProfile) -> String;

    /// 클립 이력 항목용 분석 묶음
    fn analyze_clip(&self, ctx: &AnalysisContext<'_>, tone: CoachTone) -> ClipAnalysis {
        ClipAnalysis {
            playstyle_analysis: self.playstyle(ctx),
            training_focus: self.training_focus(ctx),
            comparison: self.compare_with_previous(ctx),
            coach_feedback: self.coach_feedback(ctx, tone),
            stat_progress: self.stat_progress(ctx, "accuracy"),
            clip_summary: self.clip_summary(ctx),
            hero_and_role: self.hero_and_role(ctx),
            tagged_moments: self.tag_moments(ctx),
            skill_score: self.skill_score(ctx),
        }
    }
}
