//! Section-scoped accumulator — the single forward pass over résumé lines.
//!
//! `ParserState` carries everything the pass needs: the active section, the record
//! currently collecting lines, buffered summary text and the document built so far.
//! [`step`] advances it by one raw line, so a whole parse is a fold:
//!
//! ```text
//! text.split('\n').fold(ParserState::default(), step).finish()
//! ```

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::parser::classifier::{classify_section, Section};
use crate::parser::defaults::apply_defaults;
use crate::parser::extract::{
    extract_email, extract_gpa, extract_link, extract_period, extract_phone, is_bullet,
    strip_bullet, strip_heading_markers, strip_markdown,
};
use crate::parser::model::{EducationEntry, ExperienceEntry, ParsedResume, ProjectEntry};

/// Name/title/contact lines are only looked for this close to the top.
pub const HEADER_AREA_LINES: usize = 10;
const NAME_MAX_CHARS: usize = 15;
const TITLE_HINT_MAX_CHARS: usize = 30;
/// Skill lines longer than this are treated as prose and only split when the
/// split actually yields several items.
const SKILL_SPLIT_THRESHOLD: usize = 30;
const SKILL_MAX_CHARS: usize = 100;
const FALLBACK_DEGREE: &str = "本科";

const CONTACT_KEYWORDS: &[&str] = &["联系方式", "contact"];
const OBJECTIVE_KEYWORDS: &[&str] = &["求职意向", "objective"];
const LOCATION_KEYWORDS: &[&str] = &["所在地", "现居", "城市", "location"];
const TITLE_HINTS: &[&str] = &["工程师", "开发", "设计", "经理", "engineer", "developer"];
const SCHOOL_KEYWORDS: &[&str] = &["大学", "学院", "university", "college", "institute"];
const PROFILE_LINK_HOSTS: &[&str] = &["github.com", "linkedin.com"];

const LONG_SKILL_DELIMITERS: [char; 3] = ['、', ',', '，'];
const SHORT_SKILL_DELIMITERS: [char; 4] = ['、', ',', '，', '/'];

// "#### 张三 - Java 初级开发工程师"
static RE_NAME_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#{1,6}\s*(.+?)\s*[-–—]\s*(.+)$").expect("valid name/title regex")
});
static RE_AFTER_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[：:]\s*(.+)$").expect("valid colon regex"));
static RE_TECH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:技术|tech stack|technologies|tech|stack)\s*[:：]\s*(.+)$")
        .expect("valid tech line regex")
});

/// The record that subsequent body lines attach to.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OpenRecord {
    #[default]
    Closed,
    Experience(ExperienceEntry),
    Project(ProjectEntry),
}

#[derive(Debug, Clone, Default)]
pub struct ParserState {
    pub current_section: Option<Section>,
    pub open_record: OpenRecord,
    pub summary_buffer: Vec<String>,
    /// Index of the next raw line, blank lines included.
    pub line_index: usize,
    pub resume: ParsedResume,
}

/// Advances the parse by one raw line.
pub fn step(mut state: ParserState, raw_line: &str) -> ParserState {
    state.apply(raw_line.trim());
    state.line_index += 1;
    state
}

/// Company / role / period pulled from an experience record line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceHeader {
    pub company: String,
    pub role: String,
    pub period: String,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

fn split_fields(text: &str) -> Vec<String> {
    text.split('|')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn field(parts: &[String], idx: usize) -> String {
    parts.get(idx).map(|p| strip_markdown(p)).unwrap_or_default()
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

/// Pulls a GPA segment out of `parts`, returning its value.
fn take_gpa(parts: &mut Vec<String>) -> Option<String> {
    let idx = parts.iter().position(|p| extract_gpa(p).is_some())?;
    let part = parts.remove(idx);
    extract_gpa(&part)
}

fn split_list(text: &str, delimiters: &[char]) -> Vec<String> {
    text.split(delimiters)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Recognizes `company | role | period` style lines. Needs a period and at least
/// one other segment.
pub fn parse_experience_header(line: &str) -> Option<ExperienceHeader> {
    let period = extract_period(line)?;
    let remaining = line.replacen(period, "", 1);
    let remaining = remaining.trim();
    let remaining = remaining.strip_prefix('|').unwrap_or(remaining);
    let remaining = remaining.strip_suffix('|').unwrap_or(remaining);

    let parts = split_fields(remaining);
    if parts.is_empty() {
        return None;
    }

    Some(ExperienceHeader {
        company: field(&parts, 0),
        role: field(&parts, 1),
        period: period.trim().to_string(),
    })
}

/// Education record line: must carry both a period and a school keyword.
pub fn parse_education_line(line: &str) -> Option<EducationEntry> {
    let period = extract_period(line)?;
    if !contains_any(line, SCHOOL_KEYWORDS) {
        return None;
    }

    let remaining = line.replacen(period, "", 1);
    let remaining = strip_bullet(remaining.trim());
    let remaining = remaining.strip_prefix('|').unwrap_or(remaining);
    let remaining = remaining.strip_suffix('|').unwrap_or(remaining);

    let mut parts = split_fields(remaining);
    let gpa = take_gpa(&mut parts);

    let major = field(&parts, 1);
    let degree = parts
        .get(2)
        .map(|p| strip_markdown(p))
        .unwrap_or_else(|| major.clone());

    Some(EducationEntry {
        school: field(&parts, 0),
        degree,
        major: non_empty(major),
        period: period.trim().to_string(),
        gpa,
    })
}

/// Lenient path for bulleted education lines that carry a period but no school
/// keyword. May yield an empty `school`.
pub fn parse_education_bullet(line: &str) -> Option<EducationEntry> {
    let clean = strip_bullet(line);
    let period = extract_period(clean)?;
    let mut parts = split_fields(&clean.replacen(period, "", 1));
    let gpa = take_gpa(&mut parts);

    Some(EducationEntry {
        school: field(&parts, 0),
        degree: parts
            .get(2)
            .map(|p| strip_markdown(p))
            .unwrap_or_else(|| FALLBACK_DEGREE.to_string()),
        major: non_empty(field(&parts, 1)),
        period: period.trim().to_string(),
        gpa,
    })
}

/// Splits one skills-section line into skill strings.
pub fn split_skills(line: &str) -> Vec<String> {
    let clean = strip_bullet(line).trim();
    if clean.is_empty() {
        return Vec::new();
    }

    if clean.chars().count() > SKILL_SPLIT_THRESHOLD {
        let items: Vec<String> = split_list(clean, &LONG_SKILL_DELIMITERS)
            .into_iter()
            .filter(|s| s.chars().count() < SKILL_MAX_CHARS)
            .collect();
        if items.len() > 1 {
            return items;
        }
        return vec![clean.to_string()];
    }

    if clean.contains(LONG_SKILL_DELIMITERS) {
        return split_list(clean, &SHORT_SKILL_DELIMITERS);
    }

    vec![clean.to_string()]
}

/// Opens a project from `name | description-or-tech | period` style text.
fn parse_project_header(text: &str) -> ProjectEntry {
    let text = match extract_period(text) {
        Some(period) => text.replacen(period, "", 1),
        None => text.to_string(),
    };
    let mut parts = split_fields(&text).into_iter();
    let name = parts.next().map(|p| strip_markdown(&p)).unwrap_or_default();

    let mut tech = None;
    let mut description = Vec::new();
    for part in parts {
        let part = strip_markdown(&part);
        if tech.is_none() && part.contains(LONG_SKILL_DELIMITERS) {
            tech = Some(split_list(&part, &SHORT_SKILL_DELIMITERS));
        } else {
            description.push(part);
        }
    }

    ProjectEntry {
        name,
        description: description.join(" | "),
        tech,
    }
}

fn parse_tech_line(line: &str) -> Option<Vec<String>> {
    let plain = strip_markdown(strip_bullet(line));
    RE_TECH_LINE
        .captures(&plain)
        .and_then(|c| c.get(1))
        .map(|m| split_list(m.as_str(), &SHORT_SKILL_DELIMITERS))
}

impl ParserState {
    fn apply(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }

        if let Some(section) = classify_section(line) {
            self.enter_section(section);
            return;
        }

        if self.current_section.is_none()
            && self.line_index < HEADER_AREA_LINES
            && self.consume_header_line(line)
        {
            return;
        }

        self.capture_contact_fields(line);

        match self.current_section {
            Some(Section::Experience) => self.experience_line(line),
            Some(Section::Education) => self.education_line(line),
            Some(Section::Skills) => self.resume.skills.extend(split_skills(line)),
            Some(Section::Summary) => self.summary_line(line),
            Some(Section::Projects) => self.project_line(line),
            None => self.infer_title(line),
        }
    }

    fn enter_section(&mut self, section: Section) {
        self.close_open_record();
        self.flush_summary();
        debug!("line {}: entering {} section", self.line_index, section.as_str());
        self.current_section = Some(section);
    }

    fn close_open_record(&mut self) {
        match std::mem::take(&mut self.open_record) {
            OpenRecord::Closed => {}
            OpenRecord::Experience(entry) => self.resume.experience.push(entry),
            OpenRecord::Project(entry) => self.resume.projects.push(entry),
        }
    }

    fn flush_summary(&mut self) {
        if !self.summary_buffer.is_empty() {
            self.resume.summary = self.summary_buffer.join("\n");
            self.summary_buffer.clear();
        }
    }

    /// Name, title, contact, objective and location lines at the top of the
    /// document. Returns true when the line was consumed.
    fn consume_header_line(&mut self, line: &str) -> bool {
        if self.resume.name.is_empty() {
            if let Some(caps) = RE_NAME_TITLE.captures(line) {
                self.resume.name = strip_markdown(&caps[1]);
                self.resume.title = strip_markdown(&caps[2]);
                return true;
            }
            if line.chars().count() <= NAME_MAX_CHARS
                && !line.contains('@')
                && !line.contains("http")
            {
                self.resume.name = strip_heading_markers(&strip_markdown(line)).to_string();
                return true;
            }
        }

        if contains_any(line, CONTACT_KEYWORDS) {
            if let Some(email) = extract_email(line) {
                self.resume.email = email.to_string();
            }
            if let Some(phone) = extract_phone(line) {
                self.resume.phone = phone;
            }
            self.capture_links(line);
            return true;
        }

        if contains_any(line, OBJECTIVE_KEYWORDS) {
            if self.resume.title.is_empty() {
                if let Some(caps) = RE_AFTER_COLON.captures(line) {
                    self.resume.title = strip_markdown(&caps[1]);
                }
            }
            return true;
        }

        if contains_any(line, LOCATION_KEYWORDS) {
            if let Some(caps) = RE_AFTER_COLON.captures(line) {
                if self.resume.location.is_empty() {
                    self.resume.location = strip_markdown(&caps[1]);
                }
                return true;
            }
        }

        false
    }

    /// Email, phone and profile links may appear on any line.
    fn capture_contact_fields(&mut self, line: &str) {
        if self.resume.email.is_empty() {
            if let Some(email) = extract_email(line) {
                self.resume.email = email.to_string();
            }
        }
        if self.resume.phone.is_empty() {
            if let Some(phone) = extract_phone(line) {
                self.resume.phone = phone;
            }
        }
        self.capture_links(line);
    }

    fn capture_links(&mut self, line: &str) {
        if !contains_any(line, PROFILE_LINK_HOSTS) {
            return;
        }
        if let Some(link) = extract_link(line) {
            self.resume.links.push(link);
        }
    }

    fn experience_line(&mut self, line: &str) {
        if let Some(header) = parse_experience_header(line) {
            self.close_open_record();
            self.open_record = OpenRecord::Experience(ExperienceEntry {
                company: header.company,
                role: header.role,
                period: header.period,
                location: None,
                highlights: Vec::new(),
            });
            return;
        }

        if let OpenRecord::Experience(entry) = &mut self.open_record {
            // Markdown is kept; renderers format it.
            let highlight = strip_bullet(line);
            if !highlight.is_empty() {
                entry.highlights.push(highlight.to_string());
            }
        }
    }

    fn education_line(&mut self, line: &str) {
        if let Some(entry) = parse_education_line(line) {
            self.resume.education.push(entry);
        } else if line.starts_with(['-', '•']) {
            if let Some(entry) = parse_education_bullet(line) {
                self.resume.education.push(entry);
            }
        }
    }

    fn summary_line(&mut self, line: &str) {
        let text = strip_bullet(line);
        if !text.is_empty() {
            self.summary_buffer.push(text.to_string());
        }
    }

    // Lines naming a section keyword (`智能客服项目`) are headers and never get
    // here, so they close the open project without opening one.
    fn project_line(&mut self, line: &str) {
        if let Some(tech) = parse_tech_line(line) {
            if let OpenRecord::Project(project) = &mut self.open_record {
                project.tech = Some(tech);
            }
            return;
        }

        if is_bullet(line) {
            if let OpenRecord::Project(project) = &mut self.open_record {
                let text = strip_bullet(line);
                if !text.is_empty() {
                    if !project.description.is_empty() {
                        project.description.push('\n');
                    }
                    project.description.push_str(text);
                }
                return;
            }
        }

        let text = strip_bullet(line);
        if text.is_empty() {
            return;
        }
        self.close_open_record();
        self.open_record = OpenRecord::Project(parse_project_header(text));
    }

    fn infer_title(&mut self, line: &str) {
        if self.resume.title.is_empty()
            && self.line_index < HEADER_AREA_LINES
            && line.chars().count() <= TITLE_HINT_MAX_CHARS
            && contains_any(line, TITLE_HINTS)
        {
            self.resume.title = strip_markdown(line);
        }
    }

    /// Closes the open record, flushes the summary and applies defaults.
    pub fn finish(mut self) -> ParsedResume {
        self.close_open_record();
        self.flush_summary();
        apply_defaults(self.resume)
    }
}
