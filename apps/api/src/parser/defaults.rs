//! Defaulting policy — fills empty required fields with placeholder content so
//! renderers never receive a degenerate document.
//!
//! Only empty fields are touched. `links` and `projects` are never synthesized.

use crate::parser::model::{EducationEntry, ExperienceEntry, ParsedResume};

pub const PLACEHOLDER_NAME: &str = "张三";
pub const PLACEHOLDER_TITLE: &str = "软件工程师";
pub const PLACEHOLDER_EMAIL: &str = "example@email.com";
pub const PLACEHOLDER_PHONE: &str = "138-0000-0000";
pub const PLACEHOLDER_SKILLS: &[&str] = &["Java", "Spring Boot", "MySQL", "Redis"];

pub fn placeholder_experience() -> ExperienceEntry {
    ExperienceEntry {
        company: "某科技公司".to_string(),
        role: "高级工程师".to_string(),
        period: "2021.06 - 至今".to_string(),
        location: Some("北京".to_string()),
        highlights: vec![
            "主导核心业务系统重构，服务 QPS 提升 300%".to_string(),
            "设计并实现分布式缓存方案，系统可用性达到 99.99%".to_string(),
        ],
    }
}

pub fn placeholder_education() -> EducationEntry {
    EducationEntry {
        school: "某某大学".to_string(),
        degree: "本科".to_string(),
        major: Some("计算机科学与技术".to_string()),
        period: "2017.09 - 2021.06".to_string(),
        gpa: None,
    }
}

fn fill(field: &mut String, placeholder: &str) {
    if field.is_empty() {
        *field = placeholder.to_string();
    }
}

pub fn apply_defaults(mut resume: ParsedResume) -> ParsedResume {
    fill(&mut resume.name, PLACEHOLDER_NAME);
    fill(&mut resume.title, PLACEHOLDER_TITLE);
    fill(&mut resume.email, PLACEHOLDER_EMAIL);
    fill(&mut resume.phone, PLACEHOLDER_PHONE);

    if resume.experience.is_empty() {
        resume.experience.push(placeholder_experience());
    }
    if resume.education.is_empty() {
        resume.education.push(placeholder_education());
    }
    if resume.skills.is_empty() {
        resume.skills = PLACEHOLDER_SKILLS.iter().map(|s| s.to_string()).collect();
    }

    resume
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::ResumeLink;

    #[test]
    fn test_empty_document_is_fully_defaulted() {
        let r = apply_defaults(ParsedResume::default());
        assert_eq!(r.name, PLACEHOLDER_NAME);
        assert_eq!(r.title, PLACEHOLDER_TITLE);
        assert_eq!(r.email, PLACEHOLDER_EMAIL);
        assert_eq!(r.phone, PLACEHOLDER_PHONE);
        assert_eq!(r.experience, vec![placeholder_experience()]);
        assert_eq!(r.education, vec![placeholder_education()]);
        assert_eq!(r.skills.len(), PLACEHOLDER_SKILLS.len());
        assert!(r.links.is_empty());
        assert!(r.projects.is_empty());
        assert!(r.location.is_empty());
        assert!(r.summary.is_empty());
    }

    #[test]
    fn test_defaults_never_overwrite_present_values() {
        let input = ParsedResume {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            skills: vec!["Rust".to_string()],
            links: vec![ResumeLink {
                label: "GitHub".to_string(),
                url: "https://github.com/alice".to_string(),
            }],
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let r = apply_defaults(input);
        assert_eq!(r.name, "Alice");
        assert_eq!(r.email, "alice@example.com");
        assert_eq!(r.title, PLACEHOLDER_TITLE);
        assert_eq!(r.phone, PLACEHOLDER_PHONE);
        assert_eq!(r.skills, vec!["Rust".to_string()]);
        assert_eq!(r.experience.len(), 1);
        assert_eq!(r.experience[0].company, "Acme");
        assert_eq!(r.links.len(), 1);
    }

    #[test]
    fn test_defaulting_is_idempotent() {
        let once = apply_defaults(ParsedResume::default());
        let twice = apply_defaults(once.clone());
        assert_eq!(once, twice);
    }
}
