//! Education history extraction

use crate::config::ExtractionConfig;
use crate::processing::profile::EducationEntry;
use crate::processing::sections::{SectionKind, SectionSegmenter};
use log::debug;
use regex::Regex;

const MAX_ENTRIES: usize = 5;

pub struct EducationExtractor {
    segmenter: SectionSegmenter,
    degree_regex: Regex,
    school_regex: Regex,
    year_regex: Regex,
    part_split_regex: Regex,
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl EducationExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            segmenter: SectionSegmenter::new(config.min_section_chars),
            degree_regex: Regex::new(
                r"(?i)\b(?:bachelor(?:'s)?|master(?:'s)?|ph\.?d|doctorate|associate(?:'s)?|diploma|mba|b\.?sc|b\.s|b\.a|bs|ba|m\.?sc|m\.s|m\.a|ms|b\.?eng|m\.?eng|b\.?tech|m\.?tech)\b",
            )
            .expect("Invalid degree regex"),
            school_regex: Regex::new(r"(?i)\b(?:university|college|institute|school|academy|polytechnic)\b")
                .expect("Invalid school regex"),
            year_regex: Regex::new(r"\b(?:19|20)[0-9]{2}\b").expect("Invalid year regex"),
            part_split_regex: Regex::new(r"[,|]|[ \t]+-[ \t]+|[ \t]+at[ \t]+")
                .expect("Invalid education split regex"),
        }
    }

    /// Degrees from the education section. Empty when there is no section
    /// or no line names a degree.
    pub fn extract_education(&self, text: &str) -> Vec<EducationEntry> {
        let Some(section) = self.segmenter.find(text, SectionKind::Education) else {
            return Vec::new();
        };

        let mut entries: Vec<EducationEntry> = Vec::new();
        // A school named above its degree line
        let mut pending_school: Option<String> = None;

        for line in section.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let parts: Vec<&str> = self
                .part_split_regex
                .split(line)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            let school_part = parts.iter().find(|p| self.school_regex.is_match(p));

            if let Some(degree) = parts.iter().find(|p| self.degree_regex.is_match(p)) {
                if entries.len() == MAX_ENTRIES {
                    break;
                }
                let school = school_part
                    .filter(|s| *s != degree)
                    .map(|s| strip_year(s, &self.year_regex))
                    .or_else(|| pending_school.take())
                    .unwrap_or_default();
                entries.push(EducationEntry {
                    degree: strip_year(degree, &self.year_regex),
                    school,
                    year: None,
                });
            } else if let Some(school) = school_part {
                let school = strip_year(school, &self.year_regex);
                match entries.last_mut() {
                    Some(entry) if entry.school.is_empty() => entry.school = school,
                    _ => pending_school = Some(school),
                }
            }

            if let Some(entry) = entries.last_mut() {
                if let Some(year) = self.year_regex.find_iter(line).last() {
                    entry.year = Some(year.as_str().to_string());
                }
            }
        }

        debug!("Found {} education entries", entries.len());
        entries
    }
}

fn strip_year(part: &str, year_regex: &Regex) -> String {
    year_regex
        .replace_all(part, "")
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '(' | ')' | '-' | ','))
        .to_string()
}
