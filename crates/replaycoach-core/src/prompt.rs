//! 코칭 프롬프트 템플릿.
//!
//! 프로필과 추출 컨텍스트로 결정적인 지시문을 렌더링한다.
//! OCR 등 I/O는 여기서 하지 않는다 (`replaycoach-app::prompt::PromptBuilder` 담당).

use std::path::Path;

use crate::models::profile::UserProfile;
use crate::models::stats::ExtractedStats;

fn coach_header(profile: &UserProfile) -> String {
    format!(
        "You are an expert Overwatch coach for {} (Rank: {}).\n",
        profile.name, profile.rank
    )
}

/// 클립 분석 프롬프트
pub fn render_clip_prompt(clip_path: &Path, profile: &UserProfile) -> String {
    let mut prompt = coach_header(profile);
    prompt.push_str("This gameplay clip was recorded recently.\n");
    prompt.push_str(&format!("Clip path: {}\n\n", clip_path.display()));
    prompt.push_str(
        "Provide a clear, concise analysis identifying key moments, strengths, and areas for improvement.\n\
         Focus on facts and actionable advice only. Avoid emotional language, praise, or filler.\n\
         Structure the response with numbered sections: Key Moments, Strengths, Areas for Improvement.\n\
         Keep responses brief but detailed enough for practical use.",
    );
    prompt
}

/// 스코어보드 스탯 프롬프트
pub fn render_scoreboard_prompt(stats: &ExtractedStats, profile: &UserProfile) -> String {
    let stat_lines: Vec<String> = stats
        .iter()
        .map(|(kind, value)| format!("{kind}: {value}"))
        .collect();

    let mut prompt = coach_header(profile);
    prompt.push_str("The final scoreboard of a match was captured:\n\n");
    prompt.push_str(&stat_lines.join("\n"));
    prompt.push_str(
        "\n\nProvide clear, concise advice in numbered sections. Avoid positivity or filler.",
    );
    prompt
}

/// OCR 실패 시 스탯 없이 보내는 프롬프트
pub fn render_degraded_scoreboard_prompt(profile: &UserProfile) -> String {
    let mut prompt = coach_header(profile);
    prompt.push_str("Scoreboard OCR failed. Provide concise, factual advice only.");
    prompt
}
