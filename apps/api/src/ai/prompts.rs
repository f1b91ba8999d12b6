// Prompt templates for the résumé AI tasks. Replace `{placeholders}` before
// sending; the closing instruction comes from llm_client::prompts.

use crate::ai::industry::IndustryProfile;
use crate::ai::models::{AiRequest, AiTask, PolishStyle};
use crate::llm_client::prompts::{JSON_ONLY_SUFFIX, PLAIN_RESUME_SUFFIX, PLAIN_SENTENCE_SUFFIX};

/// Whether the model should answer with a JSON object or bare text
/// (the streaming endpoint relays text token by token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Json,
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub const ROAST_SYSTEM_TEMPLATE: &str = r#"你是一位资深HR面试官，拥有15年招聘经验。你的任务是用犀利、幽默、略带刻薄但不失专业的视角点评简历。
你需要针对{industry_name}岗位进行分析。

【重要】开场白必须使用以下这句话作为 roast 的开头，然后再进行具体分析：
"{roast_opener}"

你必须返回JSON格式，包含以下字段：
{
  "score": 0-100的综合评分,
  "roast": "以上面的开场白开始，用犀利幽默的语气写一段150字左右的毒舌点评，要戳中痛点但不失专业",
  "dimensions": {
{dimension_lines}
  },
  "ats_score": 0-100的ATS友好度评分,
  "highlights": ["3个简历亮点"],
  "weaknesses": ["3个需要改进的地方"],
  "keywords_missing": ["可能缺少的3-5个行业关键词"]
}

{closing}"#;

pub const POLISH_FULL_SYSTEM_TEMPLATE: &str = r#"你是一位专业的简历优化专家，精通STAR法则。你需要为{industry_name}岗位优化简历。

优化原则：
1. 使用STAR法则（Situation情境、Task任务、Action行动、Result结果）重构每段经历
2. 语气专业自信，避免谦虚和模糊表达
3. 量化成果，使用具体数据，可参考这些占位符格式：{placeholders}
4. 突出{expert_strategy}
{json_schema}
{closing}"#;

const POLISH_FULL_JSON_SCHEMA: &str = r#"
返回JSON格式：
{
  "polished": "完整优化后的简历文本",
  "changes": ["主要改动说明列表，3-5条"]
}
"#;

pub const POLISH_SENTENCE_SYSTEM_TEMPLATE: &str = r#"你是一位专业的简历文案专家，针对{industry_name}岗位优化简历语句。

{style_instruction}
{json_schema}
{closing}"#;

const POLISH_SENTENCE_JSON_SCHEMA: &str = r#"
返回JSON格式：
{
  "result": "优化后的句子"
}
"#;

const STANDARD_STYLE_INSTRUCTION: &str = "语言简练专业，突出核心能力，避免冗余表达";

const DATA_STYLE_INSTRUCTION_TEMPLATE: &str = r#"【数据驱动模式】你是一个数据狂魔。用户给你的这句话缺乏说服力。请重写它，并**强制**插入量化数据占位符。

必须使用的占位符格式（从中选择1-2个最合适的）：
{placeholders}

占位符必须用方括号 [] 包裹，这是强制要求！重写后的句子必须包含至少一个数据占位符。"#;

const EXPERT_STYLE_INSTRUCTION_TEMPLATE: &str = r#"【{expert_mode_name}】
{expert_strategy}
强调技术深度和行业影响力，体现战略思维和专家视角。使用更高级的专业术语和商业语言。"#;

pub const JD_MATCH_SYSTEM_TEMPLATE: &str = r#"你是一位资深招聘专家，擅长分析简历与职位描述的匹配度。请针对{industry_name}岗位进行分析。

返回JSON格式：
{
  "match_score": 0-100的匹配度评分,
  "analysis": "100字左右的匹配度分析，指出主要差距和优势",
  "matched_keywords": ["简历中已有的匹配关键词，5-8个"],
  "missing_keywords": ["简历中缺少的重要关键词，5-8个"],
  "suggestions": ["5条具体的简历优化建议，针对这个职位"]
}

{closing}"#;

/// Builds the system/user pair for one task. `roast_opener` is only used by
/// roasts; `PlainText` only applies to the polish tasks.
pub fn build_prompt(
    request: &AiRequest,
    profile: &IndustryProfile,
    roast_opener: &str,
    reply: ReplyFormat,
) -> Prompt {
    let content = request.content.as_str();
    match request.task {
        AiTask::Roast => Prompt {
            system: ROAST_SYSTEM_TEMPLATE
                .replace("{industry_name}", profile.name)
                .replace("{roast_opener}", roast_opener)
                .replace("{dimension_lines}", &dimension_lines(profile))
                .replace("{closing}", JSON_ONLY_SUFFIX),
            user: format!("请分析以下简历：\n\n{content}"),
        },
        AiTask::PolishFull => {
            let (schema, closing) = match reply {
                ReplyFormat::Json => (POLISH_FULL_JSON_SCHEMA, JSON_ONLY_SUFFIX),
                ReplyFormat::PlainText => ("", PLAIN_RESUME_SUFFIX),
            };
            Prompt {
                system: POLISH_FULL_SYSTEM_TEMPLATE
                    .replace("{industry_name}", profile.name)
                    .replace("{placeholders}", &profile.placeholder_list())
                    .replace("{expert_strategy}", profile.expert_strategy)
                    .replace("{json_schema}", schema)
                    .replace("{closing}", closing),
                user: format!("请优化以下简历：\n\n{content}"),
            }
        }
        AiTask::PolishSentence => {
            let (schema, closing) = match reply {
                ReplyFormat::Json => (POLISH_SENTENCE_JSON_SCHEMA, JSON_ONLY_SUFFIX),
                ReplyFormat::PlainText => ("", PLAIN_SENTENCE_SUFFIX),
            };
            Prompt {
                system: POLISH_SENTENCE_SYSTEM_TEMPLATE
                    .replace("{industry_name}", profile.name)
                    .replace("{style_instruction}", &style_instruction(request.style, profile))
                    .replace("{json_schema}", schema)
                    .replace("{closing}", closing),
                user: format!("请优化这句话：{content}"),
            }
        }
        AiTask::JdMatch => Prompt {
            system: JD_MATCH_SYSTEM_TEMPLATE
                .replace("{industry_name}", profile.name)
                .replace("{closing}", JSON_ONLY_SUFFIX),
            user: format!(
                "职位描述：\n{}\n\n简历内容：\n{content}",
                request.jd.as_deref().unwrap_or_default()
            ),
        },
    }
}

fn dimension_lines(profile: &IndustryProfile) -> String {
    profile
        .dimensions
        .iter()
        .map(|d| format!("    \"{d}\": 0-100"))
        .collect::<Vec<_>>()
        .join(",\n")
}

fn style_instruction(style: PolishStyle, profile: &IndustryProfile) -> String {
    match style {
        PolishStyle::Standard => STANDARD_STYLE_INSTRUCTION.to_string(),
        PolishStyle::Data => {
            DATA_STYLE_INSTRUCTION_TEMPLATE.replace("{placeholders}", &profile.placeholder_list())
        }
        PolishStyle::Expert => EXPERT_STYLE_INSTRUCTION_TEMPLATE
            .replace("{expert_mode_name}", profile.expert_mode_name)
            .replace("{expert_strategy}", profile.expert_strategy),
    }
}
