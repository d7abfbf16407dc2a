//! Extraction pipeline assembly

use crate::config::ExtractionConfig;
use crate::processing::education::EducationExtractor;
use crate::processing::experience::ExperienceExtractor;
use crate::processing::fields::FieldExtractor;
use crate::processing::normalizer::TextNormalizer;
use crate::processing::profile::ResumeProfile;
use crate::processing::projects::ProjectsExtractor;
use crate::processing::skills::SkillsExtractor;
use log::{debug, info};

/// Turns decoded resume text into a [`ResumeProfile`].
///
/// Construction compiles every extractor's pattern tables; parsing holds no
/// state between calls, so one parser can be reused for any number of
/// documents and always yields the same profile for the same text.
pub struct ResumeParser {
    normalizer: TextNormalizer,
    fields: FieldExtractor,
    skills: SkillsExtractor,
    experience: ExperienceExtractor,
    projects: ProjectsExtractor,
    education: EducationExtractor,
}

impl Default for ResumeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeParser {
    pub fn new() -> Self {
        Self::with_config(&ExtractionConfig::default())
    }

    pub fn with_config(config: &ExtractionConfig) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            fields: FieldExtractor::new(config),
            skills: SkillsExtractor::new(config),
            experience: ExperienceExtractor::new(config),
            projects: ProjectsExtractor::new(config),
            education: EducationExtractor::new(config),
        }
    }

    /// Run every extractor over `raw`. Never fails: missing signals resolve
    /// to each field's fixed default.
    pub fn parse(&self, raw: &str) -> ResumeProfile {
        let text = self.normalizer.normalize(raw);
        let flat = self.normalizer.normalize_single_line(raw);
        debug!(
            "Normalized {} input chars to {} chars",
            raw.chars().count(),
            text.chars().count()
        );

        ResumeProfile {
            name: self.fields.extract_name(&text),
            title: self.fields.extract_title(&text),
            email: self.fields.extract_email(&flat),
            phone: self.fields.extract_phone(&flat),
            links: self.fields.extract_links(&flat),
            summary: self.fields.extract_summary(&text),
            skills: self.skills.extract_skills(&text),
            experience: self.experience.extract_experience(&text),
            projects: self.projects.extract_projects(&text),
            education: self.education.extract_education(&text),
        }
    }

    /// Parse text decoded from the file called `source_name`. The name is
    /// only logged; it never feeds any field.
    pub fn parse_document(&self, raw: &str, source_name: &str) -> ResumeProfile {
        info!("Extracting profile from {}", source_name);
        let profile = self.parse(raw);

        if profile.name.is_empty() {
            info!("No candidate name found in {}", source_name);
        }
        debug!(
            "{}: {} skills, {} jobs, {} projects, {} education entries",
            source_name,
            profile.skills.len(),
            profile.experience.len(),
            profile.projects.len(),
            profile.education.len()
        );

        profile
    }
}

/// Parse with the default configuration.
pub fn extract_profile(raw: &str) -> ResumeProfile {
    ResumeParser::new().parse(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::profile::{Skill, SkillCategory};

    const JANE: &str = "Jane Smith\nSenior Backend Engineer\njane.smith@example.com\n\nSUMMARY\nBuilt distributed systems for 5 years.\n\nSKILLS\nPython, Go, Kubernetes\n\nEXPERIENCE\nSenior Backend Engineer\nAcme Corp\n2019 - Present\n• Reduced latency by 30%";

    #[test]
    fn test_full_resume() {
        let profile = extract_profile(JANE);

        assert_eq!(profile.name, "Jane Smith");
        assert_eq!(profile.title, "Senior Backend Engineer");
        assert_eq!(profile.email, "jane.smith@example.com");
        assert!(profile.summary.contains("distributed systems"));
        assert!(profile
            .skills
            .contains(&Skill::new("Python", SkillCategory::ProgrammingLanguages)));
        assert!(profile
            .skills
            .contains(&Skill::new("Kubernetes", SkillCategory::CloudDevOps)));
        assert_eq!(profile.experience[0].company, "Acme Corp");
        assert!(profile.experience[0]
            .achievements
            .iter()
            .any(|a| a.contains("Reduced latency by 30%")));
    }

    #[test]
    fn test_empty_input_uses_defaults() {
        let profile = extract_profile("");

        assert_eq!(profile.name, "");
        assert_eq!(profile.title, "Software Engineer");
        assert_eq!(profile.email, "user@example.com");
        assert_eq!(profile.summary, "");
        assert!(!profile.skills.is_empty());
        assert!(!profile.experience.is_empty());
        assert!(!profile.projects.is_empty());
        assert!(profile.education.is_empty());
        assert_eq!(profile.phone, None);
        assert!(profile.links.is_empty());
    }

    #[test]
    fn test_markup_is_normalized_before_extraction() {
        let html = "<h1>Jane Smith</h1><p>Senior Backend Engineer</p><p>Email: jane@example.com</p>";
        let profile = extract_profile(html);

        assert_eq!(profile.name, "Jane Smith");
        assert_eq!(profile.email, "jane@example.com");
    }

    #[test]
    fn test_source_name_never_becomes_the_name() {
        let parser = ResumeParser::new();
        let profile = parser.parse_document("senior engineer, 10 years of go", "John_Doe_Resume.pdf");

        assert_eq!(profile.name, "");
    }

    #[test]
    fn test_config_caps_are_honored() {
        let config = ExtractionConfig {
            max_experience_entries: 1,
            fallback_title: "Generalist".to_string(),
            ..ExtractionConfig::default()
        };
        let parser = ResumeParser::with_config(&config);
        let profile = parser.parse("EXPERIENCE\nIntern\nAcme Corporation Ltd\nTechnician\nGlobex Incorporated");

        assert_eq!(profile.experience.len(), 1);
        assert_eq!(profile.title, "Generalist");
    }
}
