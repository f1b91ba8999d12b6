use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ai::industry::IndustryProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiTask {
    Roast,
    PolishFull,
    PolishSentence,
    JdMatch,
}

impl AiTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiTask::Roast => "roast",
            AiTask::PolishFull => "polish_full",
            AiTask::PolishSentence => "polish_sentence",
            AiTask::JdMatch => "jd_match",
        }
    }

    pub fn is_streamable(&self) -> bool {
        matches!(self, AiTask::PolishFull | AiTask::PolishSentence)
    }
}

/// Rewrite register for `polish_sentence`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolishStyle {
    #[default]
    Standard,
    /// Forces quantification placeholders into the sentence.
    Data,
    /// Industry expert framing.
    Expert,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiRequest {
    #[serde(rename = "type")]
    pub task: AiTask,
    pub content: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub style: PolishStyle,
    #[serde(default)]
    pub jd: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Result shapes
// ────────────────────────────────────────────────────────────────────────────

// Every field defaults: the model occasionally drops one and a partial
// critique is still worth returning.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoastResult {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub roast: String,
    #[serde(default)]
    pub dimensions: BTreeMap<String, f64>,
    #[serde(default)]
    pub ats_score: f64,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub keywords_missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolishFullResult {
    #[serde(default)]
    pub polished: String,
    #[serde(default)]
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolishSentenceResult {
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JdMatchResult {
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AiResult {
    Roast(RoastResult),
    PolishFull(PolishFullResult),
    PolishSentence(PolishSentenceResult),
    JdMatch(JdMatchResult),
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

impl RoastResult {
    /// Keeps exactly the profile's six dimensions (missing ones score 0)
    /// and clamps every score into 0..=100.
    pub fn normalized(mut self, profile: &IndustryProfile) -> Self {
        self.score = clamp_score(self.score);
        self.ats_score = clamp_score(self.ats_score);
        self.dimensions = profile
            .dimensions
            .iter()
            .map(|name| {
                let score = self.dimensions.get(*name).copied().unwrap_or(0.0);
                (name.to_string(), clamp_score(score))
            })
            .collect();
        self
    }
}

impl JdMatchResult {
    pub fn normalized(mut self) -> Self {
        self.match_score = clamp_score(self.match_score);
        self
    }
}
