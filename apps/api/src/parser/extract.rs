//! Field extractors — total, single-line pattern matchers.
//!
//! Every extractor returns `None` instead of failing, and none of them depend on
//! where in the document the line sits. The accumulator decides what to do with the
//! fragments.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::parser::model::ResumeLink;

pub const GITHUB_LABEL: &str = "GitHub";
pub const LINKEDIN_LABEL: &str = "LinkedIn";
pub const GENERIC_LINK_LABEL: &str = "Link";

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+\.[A-Za-z0-9_]+").expect("valid email regex")
});
// CN mobile: 1, then 3-9, then at least nine more digits or hyphens.
static RE_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"1[3-9][0-9][0-9\-]{8,}").expect("valid phone regex"));
static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));

// YYYY.MM - YYYY.MM / YYYY年MM月 至 至今 / 2020/01 ~ present ...
static RE_PERIOD_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[0-9]{4}[.\-/年][0-9]{1,2}月?\s*[-–—~到至]\s*(?:[0-9]{4}[.\-/年][0-9]{1,2}月?|至今|present|now|current)",
    )
    .expect("valid month period regex")
});
static RE_PERIOD_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9]{4}\s*[-–—~到至]\s*(?:[0-9]{4}|至今|present)")
        .expect("valid year period regex")
});

static RE_GPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)GPA\s*[:：]?\s*([0-9]+(?:\.[0-9]+)?(?:\s*/\s*[0-9]+(?:\.[0-9]+)?)?)")
        .expect("valid gpa regex")
});

static RE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid bold regex"));
static RE_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid italic regex"));
static RE_LENTICULAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【(.*?)】").expect("valid lenticular bracket regex"));
static RE_SQUARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("valid square bracket regex"));
static RE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("valid inline code regex"));

const URL_TRAILING_PUNCTUATION: &[char] = &[')', ']', ',', '.', ';', '）', '，', '。', '；'];

/// Collapses bold, italic, 【】, `[]` and inline-code wrappers to their inner text.
pub fn strip_markdown(text: &str) -> String {
    let text = RE_BOLD.replace_all(text, "$1");
    let text = RE_ITALIC.replace_all(&text, "$1");
    let text = RE_LENTICULAR.replace_all(&text, "$1");
    let text = RE_SQUARE.replace_all(&text, "$1");
    let text = RE_CODE.replace_all(&text, "$1");
    text.trim().to_string()
}

/// Removes leading `#` heading markers.
pub fn strip_heading_markers(text: &str) -> &str {
    text.trim_start_matches('#').trim()
}

/// True when the line starts with a list marker (`-`, `•`, or a single `*`).
/// A leading `**` is bold emphasis, not a bullet.
pub fn is_bullet(line: &str) -> bool {
    if line.starts_with("**") {
        return false;
    }
    line.starts_with(['-', '•', '*'])
}

/// Drops one leading list marker and the whitespace after it.
pub fn strip_bullet(line: &str) -> &str {
    if !is_bullet(line) {
        return line;
    }
    let mut chars = line.chars();
    chars.next();
    chars.as_str().trim_start()
}

pub fn extract_email(line: &str) -> Option<&str> {
    RE_EMAIL.find(line).map(|m| m.as_str())
}

/// Returns the first CN mobile number with hyphens removed.
pub fn extract_phone(line: &str) -> Option<String> {
    RE_PHONE.find(line).map(|m| m.as_str().replace('-', ""))
}

/// Returns the first date-range token, verbatim. The month-precision pattern is
/// tried before the bare year range.
pub fn extract_period(line: &str) -> Option<&str> {
    RE_PERIOD_MONTH
        .find(line)
        .or_else(|| RE_PERIOD_YEAR.find(line))
        .map(|m| m.as_str())
}

/// Returns the first http(s) URL on the line, labelled by host.
pub fn extract_link(line: &str) -> Option<ResumeLink> {
    let token = RE_URL.find(line)?.as_str();
    let url = token.trim_end_matches(URL_TRAILING_PUNCTUATION);
    Some(ResumeLink {
        label: link_label(url).to_string(),
        url: url.to_string(),
    })
}

fn link_label(url: &str) -> &'static str {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_else(|| url.to_lowercase());

    if host.contains("github") {
        GITHUB_LABEL
    } else if host.contains("linkedin") {
        LINKEDIN_LABEL
    } else {
        GENERIC_LINK_LABEL
    }
}

/// Returns the GPA value (e.g. "3.8/4.0") if the text carries one.
pub fn extract_gpa(text: &str) -> Option<String> {
    RE_GPA
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().split_whitespace().collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown_bold() {
        assert_eq!(strip_markdown("**工作经历**"), "工作经历");
    }

    #[test]
    fn test_strip_markdown_mixed_wrappers() {
        assert_eq!(
            strip_markdown("【项目】 *Rust* [link] `cargo`"),
            "项目 Rust link cargo"
        );
    }

    #[test]
    fn test_strip_markdown_plain_text_unchanged() {
        assert_eq!(strip_markdown("  plain text  "), "plain text");
    }

    #[test]
    fn test_strip_heading_markers() {
        assert_eq!(strip_heading_markers("### Skills"), "Skills");
        assert_eq!(strip_heading_markers("Skills"), "Skills");
    }

    #[test]
    fn test_strip_bullet_variants() {
        assert_eq!(strip_bullet("- 主导核心系统重构"), "主导核心系统重构");
        assert_eq!(strip_bullet("• 优化了性能"), "优化了性能");
        assert_eq!(strip_bullet("* item"), "item");
        assert_eq!(strip_bullet("no marker"), "no marker");
    }

    #[test]
    fn test_strip_bullet_keeps_leading_bold() {
        assert_eq!(strip_bullet("**性能优化**：QPS 提升 3 倍"), "**性能优化**：QPS 提升 3 倍");
    }

    #[test]
    fn test_extract_email() {
        assert_eq!(
            extract_email("邮箱: alice.w@example.com | 电话"),
            Some("alice.w@example.com")
        );
        assert_eq!(extract_email("no email here"), None);
    }

    #[test]
    fn test_extract_phone_strips_hyphens() {
        assert_eq!(
            extract_phone("电话：138-1234-5678").as_deref(),
            Some("13812345678")
        );
        assert_eq!(extract_phone("15912345678").as_deref(), Some("15912345678"));
    }

    #[test]
    fn test_extract_phone_rejects_invalid_prefix() {
        assert_eq!(extract_phone("12012345678"), None);
        assert_eq!(extract_phone("1381234"), None);
    }

    #[test]
    fn test_extract_period_month_range() {
        assert_eq!(
            extract_period("字节跳动 | 高级工程师 | 2021.06 - 至今"),
            Some("2021.06 - 至今")
        );
        assert_eq!(
            extract_period("2019年7月至2021年5月 某公司"),
            Some("2019年7月至2021年5月")
        );
        assert_eq!(
            extract_period("Acme | SWE | 2020/01 – Present"),
            Some("2020/01 – Present")
        );
    }

    #[test]
    fn test_extract_period_year_range() {
        assert_eq!(extract_period("工作经历 2020-2022"), Some("2020-2022"));
        assert_eq!(extract_period("MIT 2016 ~ present"), Some("2016 ~ present"));
    }

    #[test]
    fn test_extract_period_month_pattern_wins() {
        // The year pattern would match "2018 - 2019" first in the line, but the
        // month pattern is tried first.
        assert_eq!(
            extract_period("2018 - 2019 then 2019.03 - 2020.04"),
            Some("2019.03 - 2020.04")
        );
    }

    #[test]
    fn test_extract_period_none() {
        assert_eq!(extract_period("负责核心模块开发"), None);
        assert_eq!(extract_period("2021"), None);
    }

    #[test]
    fn test_extract_link_github() {
        let link = extract_link("GitHub: https://github.com/alice").unwrap();
        assert_eq!(link.label, "GitHub");
        assert_eq!(link.url, "https://github.com/alice");
    }

    #[test]
    fn test_extract_link_linkedin() {
        let link = extract_link("https://www.linkedin.com/in/alice").unwrap();
        assert_eq!(link.label, "LinkedIn");
    }

    #[test]
    fn test_extract_link_generic() {
        let link = extract_link("Blog: https://example.com").unwrap();
        assert_eq!(link.label, GENERIC_LINK_LABEL);
        assert_ne!(link.label, "GitHub");
        assert_ne!(link.label, "LinkedIn");
    }

    #[test]
    fn test_extract_link_trims_markdown_paren() {
        let link = extract_link("[主页](https://github.com/alice)").unwrap();
        assert_eq!(link.url, "https://github.com/alice");
    }

    #[test]
    fn test_extract_link_none() {
        assert!(extract_link("github.com/alice").is_none());
    }

    #[test]
    fn test_extract_gpa() {
        assert_eq!(extract_gpa("GPA: 3.8/4.0").as_deref(), Some("3.8/4.0"));
        assert_eq!(extract_gpa("gpa 3.6 / 4").as_deref(), Some("3.6/4"));
        assert_eq!(extract_gpa("计算机科学"), None);
    }
}
