//! Section lookup with fuzzy-match suggestions.
//!
//! A miss produces an actionable error: the closest existing id plus the full
//! candidate list, so a caller (human or agent) can retry with the right slug.
//! Scoring runs in both query directions because hand-typed ids are often
//! longer than the stored slug ("work experience" should still suggest
//! "experience").

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::errors::AppError;
use crate::models::resume::{Resume, Section};

/// Finds a section by id, or fails with a suggestion-bearing error.
pub fn resolve_section<'a>(resume: &'a Resume, section_id: &str) -> Result<&'a Section, AppError> {
    resume
        .section_by_id(section_id)
        .ok_or_else(|| section_not_found(section_id, &resume.section_ids()))
}

/// Index variant used by the update protocol for the replace-by-id write-back.
pub fn resolve_section_index(resume: &Resume, section_id: &str) -> Result<usize, AppError> {
    resume
        .section_index(section_id)
        .ok_or_else(|| section_not_found(section_id, &resume.section_ids()))
}

fn section_not_found(requested: &str, available: &[&str]) -> AppError {
    let all_ids = available.join(", ");
    let message = match best_match(requested, available) {
        Some(best) => format!(
            "Section '{requested}' not found, did you mean '{best}'?, all available section ids are: {all_ids}"
        ),
        None => {
            format!("Section '{requested}' not found, all available section ids are: {all_ids}")
        }
    };
    AppError::SectionNotFound(message)
}

/// Best fuzzy candidate for a missed id, highest score in either direction.
fn best_match(requested: &str, candidates: &[&str]) -> Option<String> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let mut scratch = Vec::new();
    let forward = Pattern::parse(requested, CaseMatching::Ignore, Normalization::Smart);

    let mut best: Option<(u32, &str)> = None;
    for &candidate in candidates {
        let forward_score = forward.score(Utf32Str::new(candidate, &mut scratch), &mut matcher);
        let reverse_score = Pattern::parse(candidate, CaseMatching::Ignore, Normalization::Smart)
            .score(Utf32Str::new(requested, &mut scratch), &mut matcher);
        if let Some(score) = forward_score.into_iter().chain(reverse_score).max() {
            if best.map_or(true, |(top, _)| score > top) {
                best = Some((score, candidate));
            }
        }
    }
    best.map(|(_, candidate)| candidate.to_string())
}
