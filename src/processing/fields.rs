//! Single-value field extractors: name, title, contact details and summary

use crate::config::ExtractionConfig;
use crate::processing::normalizer::leading_chars;
use crate::processing::profile::ProfileLinks;
use crate::processing::sections::{is_known_heading, SectionKind, SectionSegmenter};
use log::debug;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Strings that only show up when a binary container leaked into the text.
const ARTIFACT_MARKERS: &[&str] = &["endobj", "xmp", "xref", "/filter", "flatedecode", "obj <<"];

/// Where a name rule looks for its candidate.
#[derive(Debug, Clone, Copy)]
enum NameScope {
    /// The leading window of the document
    Window,
    /// Each of the first N non-empty lines, tried separately
    LeadingLines(usize),
}

struct NameRule {
    label: &'static str,
    pattern: Regex,
    scope: NameScope,
    /// Candidate is written in capitals and gets title-cased before validation
    all_caps: bool,
}

struct TitleRule {
    label: &'static str,
    pattern: Regex,
    /// Capture group holding the title; 0 means the whole match
    group: usize,
}

pub struct FieldExtractor {
    name_window_chars: usize,
    title_window_chars: usize,
    summary_min_chars: usize,
    summary_max_chars: usize,
    fallback_title: String,
    fallback_email: String,
    segmenter: SectionSegmenter,
    name_rules: Vec<NameRule>,
    name_shape_regex: Regex,
    name_reject_regex: Regex,
    title_rules: Vec<TitleRule>,
    labeled_email_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    github_regex: Regex,
    linkedin_regex: Regex,
    url_regex: Regex,
    bullet_regex: Regex,
    whitespace_regex: Regex,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl FieldExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            name_window_chars: config.name_window_chars,
            title_window_chars: config.title_window_chars,
            summary_min_chars: config.summary_min_chars,
            summary_max_chars: config.summary_max_chars,
            fallback_title: config.fallback_title.clone(),
            fallback_email: config.fallback_email.clone(),
            segmenter: SectionSegmenter::new(config.min_section_chars),
            name_rules: Self::name_rules(),
            name_shape_regex: Regex::new(r"^[A-Z][a-z]+[ \t]+[A-Z][a-z]+")
                .expect("Invalid name shape regex"),
            name_reject_regex: Regex::new(
                r"(?i)\b(?:engineer|developer|manager|analyst|specialist|consultant|designer|resume|curriculum|vitae|cv|document|page)\b",
            )
            .expect("Invalid name reject regex"),
            title_rules: Self::title_rules(),
            labeled_email_regex: Regex::new(
                r"(?i)\be-?mail[ \t]*:?[ \t]*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
            )
            .expect("Invalid labeled email regex"),
            email_regex: Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
                .expect("Invalid email regex"),
            phone_regex: Regex::new(
                r"(?:\+?1[-. ]?)?(?:\([0-9]{3}\)|\b[0-9]{3})[-. ]?[0-9]{3}[-. ]?[0-9]{4}\b",
            )
            .expect("Invalid phone regex"),
            github_regex: Regex::new(
                r"(?i)\b(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_.-]+(?:/[A-Za-z0-9_.-]+)?",
            )
            .expect("Invalid GitHub regex"),
            linkedin_regex: Regex::new(
                r"(?i)\b(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/in/[A-Za-z0-9_%-]+/?",
            )
            .expect("Invalid LinkedIn regex"),
            url_regex: Regex::new(r#"https?://[^\s<>()\[\]"',]+"#).expect("Invalid URL regex"),
            bullet_regex: Regex::new(r"^[•*\-][ \t]*").expect("Invalid bullet regex"),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    fn name_rules() -> Vec<NameRule> {
        let rule = |label, pattern: &str, scope, all_caps| NameRule {
            label,
            pattern: Regex::new(pattern).expect("Invalid name rule regex"),
            scope,
            all_caps,
        };

        vec![
            rule(
                "title case at start",
                r"\A[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,2})[ \t]*(?:\n|\z)",
                NameScope::Window,
                false,
            ),
            rule(
                "all caps at start",
                r"\A[ \t]*([A-Z]{2,}(?:[ \t]+[A-Z]{2,}){1,2})[ \t]*(?:\n|\z)",
                NameScope::Window,
                true,
            ),
            rule(
                "labeled",
                r"(?m)^[ \t]*(?i:full[ \t]+name|name)[ \t]*:[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,2})",
                NameScope::Window,
                false,
            ),
            rule(
                "before contact line",
                r"(?m)^[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,2})[ \t]*\n[^\n]*(?:@|\+\d|\d{3})",
                NameScope::Window,
                false,
            ),
            rule(
                "leading lines",
                r"^([A-Z][a-zA-Z]+(?:[ \t]+[A-Z][a-zA-Z]+){1,2})$",
                NameScope::LeadingLines(2),
                false,
            ),
        ]
    }

    fn title_rules() -> Vec<TitleRule> {
        let rule = |label, pattern: &str, group| TitleRule {
            label,
            pattern: Regex::new(pattern).expect("Invalid title rule regex"),
            group,
        };

        vec![
            rule(
                "seniority + discipline + role",
                r"(?i)\b(?:senior|sr\.?|junior|jr\.?|lead|principal|staff|chief)[ \t]+(?:software|web|full[ \t-]?stack|front[ \t-]?end|back[ \t-]?end|mobile|platform|cloud|data|devops|qa|security|systems?)[ \t]+(?:engineer|developer|programmer|architect)\b",
                0,
            ),
            rule(
                "discipline + role",
                r"(?i)\b(?:software|web|full[ \t-]?stack|front[ \t-]?end|back[ \t-]?end|mobile|platform|embedded|game|ios|android)[ \t]+(?:engineer|developer|programmer|architect)\b",
                0,
            ),
            rule(
                "data role",
                r"(?i)\b(?:(?:senior|lead)[ \t]+)?(?:data|machine[ \t]+learning|ai|ml|research)[ \t]+(?:scientist|engineer|analyst)\b",
                0,
            ),
            rule(
                "manager",
                r"(?i)\b(?:(?:senior|associate)[ \t]+)?(?:product|project|program|engineering|marketing|sales|operations)[ \t]+manager\b",
                0,
            ),
            rule(
                "infrastructure engineer",
                r"(?i)\b(?:senior[ \t]+)?(?:devops|cloud|infrastructure|site[ \t]+reliability|security|network)[ \t]+engineer\b",
                0,
            ),
            rule(
                "designer",
                r"(?i)\b(?:(?:senior|lead)[ \t]+)?(?:ux/ui|ui/ux|ux|ui|product|graphic|visual|interaction)[ \t]+designer\b",
                0,
            ),
            rule(
                "isolated title line",
                r"(?m)^[ \t]*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*[ \t]+(?:Engineer|Developer|Manager|Analyst|Designer|Scientist|Consultant|Architect|Accountant|Specialist|Director|Coordinator))[ \t]*$",
                1,
            ),
        ]
    }

    /// Candidate's name from the top of the document, or an empty string.
    pub fn extract_name(&self, text: &str) -> String {
        let window = leading_chars(text, self.name_window_chars);

        for rule in &self.name_rules {
            let haystacks: Vec<&str> = match rule.scope {
                NameScope::Window => vec![window],
                NameScope::LeadingLines(count) => window
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .take(count)
                    .collect(),
            };

            for haystack in haystacks {
                for caps in rule.pattern.captures_iter(haystack) {
                    let Some(raw) = caps.get(1) else { continue };
                    let mut candidate = self.collapse(raw.as_str());
                    if rule.all_caps {
                        candidate = title_case(&candidate);
                    }
                    if self.is_valid_name(&candidate) {
                        debug!("Name matched by rule '{}'", rule.label);
                        return candidate;
                    }
                }
            }
        }

        debug!("No valid name found in document content");
        String::new()
    }

    fn is_valid_name(&self, candidate: &str) -> bool {
        let length = candidate.chars().count();
        (4..50).contains(&length)
            && self.name_shape_regex.is_match(candidate)
            && !self.name_reject_regex.is_match(candidate)
            && !is_known_heading(candidate)
    }

    /// Job title from the top of the document, falling back to the
    /// configured default title.
    pub fn extract_title(&self, text: &str) -> String {
        let window = leading_chars(text, self.title_window_chars);

        for rule in &self.title_rules {
            if let Some(found) = rule
                .pattern
                .captures(window)
                .and_then(|caps| caps.get(rule.group))
            {
                debug!("Title matched by rule '{}'", rule.label);
                return self.collapse(found.as_str());
            }
        }

        self.fallback_title.clone()
    }

    /// Email address, preferring an `Email:` labeled occurrence.
    pub fn extract_email(&self, text: &str) -> String {
        if let Some(labeled) = self
            .labeled_email_regex
            .captures(text)
            .and_then(|caps| caps.get(1))
        {
            return labeled.as_str().to_string();
        }

        self.email_regex
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| self.fallback_email.clone())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex
            .find(text)
            .map(|m| m.as_str().trim().to_string())
    }

    pub fn extract_links(&self, text: &str) -> ProfileLinks {
        let github = self
            .github_regex
            .find(text)
            .map(|m| with_scheme(trim_url(m.as_str())));
        let linkedin = self
            .linkedin_regex
            .find(text)
            .map(|m| with_scheme(trim_url(m.as_str())));
        let website = self
            .url_regex
            .find_iter(text)
            .map(|m| trim_url(m.as_str()))
            .find(|url| {
                let lower = url.to_lowercase();
                !lower.contains("github.com") && !lower.contains("linkedin.com")
            })
            .map(str::to_string);

        ProfileLinks {
            github,
            linkedin,
            website,
        }
    }

    /// Body of the first Summary/About/Objective/Profile section that reads
    /// like prose, or an empty string.
    pub fn extract_summary(&self, text: &str) -> String {
        for alias in SectionKind::Summary.aliases() {
            let Some(section) = self.segmenter.find_section(text, &[alias]) else {
                continue;
            };

            let summary = self.clean_summary(&section);
            if self.is_valid_summary(&summary) {
                debug!("Summary found under '{}' heading", alias);
                return summary;
            }
            debug!("Rejected summary candidate under '{}' heading", alias);
        }

        String::new()
    }

    fn clean_summary(&self, section: &str) -> String {
        let joined = section
            .lines()
            .map(|line| self.bullet_regex.replace(line.trim(), "").to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        self.collapse(&joined)
    }

    fn is_valid_summary(&self, summary: &str) -> bool {
        let length = summary.chars().count();
        if length < self.summary_min_chars || length > self.summary_max_chars {
            return false;
        }

        let lower = summary.to_lowercase();
        if ARTIFACT_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return false;
        }

        let visible = summary.chars().filter(|c| !c.is_whitespace()).count();
        let letters = summary.chars().filter(|c| c.is_alphabetic()).count();
        if letters * 2 < visible {
            return false;
        }

        summary.unicode_words().count() >= 3
    }

    fn collapse(&self, text: &str) -> String {
        self.whitespace_regex.replace_all(text.trim(), " ").to_string()
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn trim_url(url: &str) -> &str {
    url.trim_end_matches(['.', ',', ';', ':', ')', '/'])
}

fn with_scheme(url: &str) -> String {
    if url.to_lowercase().starts_with("http") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
