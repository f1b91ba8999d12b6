// Shared prompt fragments. Feature-specific templates live next to the
// feature (see ai/prompts.rs); this file holds the closing instructions every
// template ends with.

/// Closing instruction for prompts whose reply is parsed as JSON.
pub const JSON_ONLY_SUFFIX: &str = "只返回JSON，不要有其他内容。所有回复必须使用中文。";

/// Closing instruction for streamed full-résumé rewrites.
pub const PLAIN_RESUME_SUFFIX: &str =
    "直接输出优化后的完整简历文本，不要包含任何JSON格式或额外说明。所有回复必须使用中文。";

/// Closing instruction for streamed single-sentence rewrites.
pub const PLAIN_SENTENCE_SUFFIX: &str =
    "直接输出优化后的句子，不要包含任何JSON格式、引号或额外说明。所有回复必须使用中文。";
