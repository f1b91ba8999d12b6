//! Section detection — maps a single line to one of the résumé blocks.
//!
//! Keyword groups are data: `SECTION_PATTERNS` is scanned in order and the first
//! group that matches wins. Matching is containment on the decoration-stripped,
//! lower-cased line, so "**工作经历**" and "## Work Experience" both classify.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::parser::extract::{strip_heading_markers, strip_markdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
    Skills,
    Summary,
    Projects,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Summary => "summary",
            Section::Projects => "projects",
        }
    }
}

/// Priority-ordered keyword groups (Chinese and English synonyms).
pub const SECTION_PATTERNS: &[(Section, &str)] = &[
    (Section::Experience, r"工作经[历验]|experience|employment"),
    (Section::Education, r"教育|education|学[历位]背景"),
    (Section::Skills, r"技能|skills|专业技能|技术栈"),
    (Section::Summary, r"个人[简总]结|summary|自我评价|简介|about"),
    (Section::Projects, r"项目|project"),
];

static COMPILED_PATTERNS: LazyLock<Vec<(Section, Regex)>> = LazyLock::new(|| {
    SECTION_PATTERNS
        .iter()
        .map(|(section, pattern)| {
            (
                *section,
                Regex::new(pattern).expect("valid section keyword regex"),
            )
        })
        .collect()
});

fn clean_for_detection(line: &str) -> String {
    strip_heading_markers(&strip_markdown(line)).to_lowercase()
}

/// Returns the section a line names, or `None` for body content.
/// Stateless: the answer depends only on the line. Any match makes the line a
/// header, whatever else it carries (bullet marker, `|` fields, a value after
/// a colon, length).
pub fn classify_section(line: &str) -> Option<Section> {
    let clean = clean_for_detection(line);
    COMPILED_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&clean))
        .map(|(section, _)| *section)
}
