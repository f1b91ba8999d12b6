//! Polished-highlight override — lifts achievement-like lines out of externally
//! polished text and puts them on the first experience entry.

use crate::parser::extract::strip_bullet;
use crate::parser::model::ParsedResume;

const MAX_POLISHED_HIGHLIGHTS: usize = 6;
const MIN_HIGHLIGHT_CHARS: usize = 10;
const MAX_HIGHLIGHT_CHARS: usize = 200;
const ACHIEVEMENT_HINTS: &[&str] = &["%", "提升", "优化", "负责", "主导"];

fn looks_like_highlight(line: &str) -> bool {
    let len = line.chars().count();
    len > MIN_HIGHLIGHT_CHARS
        && len < MAX_HIGHLIGHT_CHARS
        && (ACHIEVEMENT_HINTS.iter().any(|h| line.contains(h)) || line.starts_with(['-', '•']))
}

/// Picks up to six highlight-like lines from polished text, bullet markers removed.
/// A leading `**` is bold emphasis and stays, so `**性能优化**：…` keeps its markup.
pub fn polished_highlights(polished: &str) -> Vec<String> {
    polished
        .lines()
        .map(str::trim)
        .filter(|line| looks_like_highlight(line))
        .map(|line| strip_bullet(line).trim().to_string())
        .take(MAX_POLISHED_HIGHLIGHTS)
        .collect()
}

impl ParsedResume {
    /// Replaces `experience[0].highlights` with highlights found in `polished`.
    /// Leaves the document unchanged when nothing qualifies.
    pub fn with_polished_highlights(mut self, polished: &str) -> Self {
        let highlights = polished_highlights(polished);
        if highlights.is_empty() {
            return self;
        }
        if let Some(first) = self.experience.first_mut() {
            first.highlights = highlights;
        }
        self
    }
}
