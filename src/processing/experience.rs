//! Work history extraction

use crate::config::ExtractionConfig;
use crate::processing::profile::ExperienceEntry;
use crate::processing::sections::{SectionKind, SectionSegmenter};
use log::debug;
use regex::Regex;

const DEFAULT_TITLE: &str = "Software Engineer";
const DEFAULT_COMPANY: &str = "Tech Company";
const DEFAULT_DURATION: &str = "2020 - Present";
const DEFAULT_LOCATION: &str = "Remote";
const DEFAULT_DESCRIPTION: &str = "Developing scalable applications";
const DEFAULT_ACHIEVEMENT: &str = "Built modern web applications";

const MAX_HEADER_CHARS: usize = 100;
const MAX_COMPANY_CHARS: usize = 80;
const MIN_DESCRIPTION_CHARS: usize = 30;

pub struct ExperienceExtractor {
    max_entries: usize,
    segmenter: SectionSegmenter,
    role_regex: Regex,
    duration_regex: Regex,
    separator_regex: Regex,
    city_state_regex: Regex,
    work_mode_regex: Regex,
    bullet_regex: Regex,
}

impl Default for ExperienceExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl ExperienceExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?[ \t]+";

        Self {
            max_entries: config.max_experience_entries,
            segmenter: SectionSegmenter::new(config.min_section_chars),
            role_regex: Regex::new(
                r"(?i)\b(?:engineer|developer|manager|analyst|specialist|consultant|director|lead|architect|designer|scientist|intern|coordinator|administrator|accountant|officer|associate|assistant|executive|technician|programmer)s?(?:[ \t]+(?:i{1,3}|iv|[1-4]))?$",
            )
            .expect("Invalid role regex"),
            duration_regex: Regex::new(&format!(
                r"(?i)\b(?:{m})?\d{{4}}[ \t]*(?:-|–|—|to)[ \t]*(?:(?:{m})?\d{{4}}|present|current|now)\b",
                m = MONTH
            ))
            .expect("Invalid duration regex"),
            separator_regex: Regex::new(r"(?i)^(.+?)[ \t]+(?:at|@|-|–|\|)[ \t]+(.+)$")
                .expect("Invalid title separator regex"),
            city_state_regex: Regex::new(r"\b[A-Z][a-zA-Z]+(?:[ \t][A-Z][a-zA-Z]+)*,[ \t]?[A-Z]{2}\b")
                .expect("Invalid location regex"),
            work_mode_regex: Regex::new(r"(?i)\b(?:remote|hybrid|on-site|onsite)\b")
                .expect("Invalid work mode regex"),
            bullet_regex: Regex::new(r"^[•*\-][ \t]*").expect("Invalid bullet regex"),
        }
    }

    /// Jobs from the experience section (or the whole document when there
    /// is none), in document order. Never empty.
    pub fn extract_experience(&self, text: &str) -> Vec<ExperienceEntry> {
        let (source, in_section) = match self.segmenter.find(text, SectionKind::Experience) {
            Some(section) => (section, true),
            None => {
                debug!("No experience section, scanning whole document");
                (text.to_string(), false)
            }
        };

        let entries: Vec<ExperienceEntry> = self
            .split_blocks(&source, in_section)
            .iter()
            .take(self.max_entries)
            .map(|block| self.parse_block(block))
            .collect();

        if entries.is_empty() {
            debug!("No job blocks found, using placeholder entry");
            return vec![placeholder_entry()];
        }

        entries
    }

    /// A capitalized, non-bullet, non-sentence line whose title part ends
    /// in a role noun. The title part is what precedes an `at`/`-`/`|`
    /// company suffix once any duration is removed.
    fn is_job_start(&self, line: &str) -> bool {
        let starts_upper = line.chars().next().is_some_and(char::is_uppercase);
        if !starts_upper
            || self.is_bullet(line)
            || line.chars().count() > MAX_HEADER_CHARS
            || line.ends_with('.')
        {
            return false;
        }

        let header = self.strip_duration(line);
        let title = self
            .separator_regex
            .captures(&header)
            .and_then(|caps| caps.get(1))
            .map_or(header.as_str(), |m| trim_separators(m.as_str()));
        self.role_regex.is_match(title)
    }

    fn is_bullet(&self, line: &str) -> bool {
        self.bullet_regex.is_match(line)
    }

    /// Group lines under job headers. Lines above the first header belong
    /// to it (or form the only block) inside an experience section; in the
    /// whole-document fallback they are the résumé preamble and are dropped.
    /// A heading line closes the current block.
    fn split_blocks<'a>(&self, text: &'a str, in_section: bool) -> Vec<Vec<&'a str>> {
        let mut preamble: Vec<&str> = Vec::new();
        let mut blocks: Vec<Vec<&str>> = Vec::new();
        let mut closed = false;

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if self.is_job_start(line) {
                blocks.push(vec![line]);
                closed = false;
            } else if self.segmenter.is_heading_line(line) {
                closed = true;
            } else if let Some(current) = blocks.last_mut().filter(|_| !closed) {
                current.push(line);
            } else if blocks.is_empty() && !closed {
                preamble.push(line);
            }
        }

        if in_section {
            // Company or date lines written above the first title belong to it.
            match blocks.first_mut() {
                Some(first) => {
                    let tail = first.split_off(1);
                    first.extend(preamble);
                    first.extend(tail);
                }
                None if !preamble.is_empty() => blocks.push(preamble),
                None => {}
            }
        } else if !preamble.is_empty() {
            debug!("Ignoring {} lines above the first job header", preamble.len());
        }

        blocks
            .into_iter()
            .filter(|block| {
                let chars: usize = block.iter().map(|l| l.chars().count()).sum();
                block.len() >= 2 && chars > 20
            })
            .collect()
    }

    fn parse_block(&self, lines: &[&str]) -> ExperienceEntry {
        let joined = lines.join("\n");

        let duration = self
            .duration_regex
            .find(&joined)
            .map(|m| m.as_str().to_string());

        let location = lines
            .iter()
            .filter(|line| !self.is_bullet(line))
            .find_map(|line| self.find_location(line));

        let header = self.strip_duration(lines[0]);
        let (title, mut company, company_idx) = match self.separator_regex.captures(&header) {
            Some(caps) => (
                trim_separators(&caps[1]).to_string(),
                trim_separators(&caps[2]).to_string(),
                None,
            ),
            None => {
                let second = lines
                    .get(1)
                    .filter(|line| self.is_company_line(line, location.as_deref()))
                    .map(|line| self.strip_duration(line));
                match second {
                    Some(company) => (header.clone(), company, Some(1)),
                    None => (header.clone(), String::new(), None),
                }
            }
        };

        if location.is_some() {
            company = self.strip_location(&company);
        }

        let achievements: Vec<String> = lines
            .iter()
            .filter(|line| self.is_bullet(line))
            .map(|line| self.bullet_regex.replace(line, "").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        let description = lines
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(idx, _)| Some(*idx) != company_idx)
            .map(|(_, line)| *line)
            .find(|line| {
                !self.is_bullet(line)
                    && line.chars().count() >= MIN_DESCRIPTION_CHARS
                    && !self.duration_regex.is_match(line)
                    && location.as_deref() != Some(line.trim())
            });

        ExperienceEntry {
            title: non_empty_or(&title, DEFAULT_TITLE),
            company: non_empty_or(&company, DEFAULT_COMPANY),
            duration: duration.unwrap_or_else(|| DEFAULT_DURATION.to_string()),
            location: location.unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            description: description
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            achievements: if achievements.is_empty() {
                vec![DEFAULT_ACHIEVEMENT.to_string()]
            } else {
                achievements
            },
        }
    }

    fn find_location(&self, line: &str) -> Option<String> {
        if let Some(m) = self.city_state_regex.find(line) {
            return Some(m.as_str().to_string());
        }
        self.work_mode_regex
            .find(line)
            .map(|m| capitalize(&m.as_str().to_lowercase()))
    }

    fn strip_location(&self, company: &str) -> String {
        let company = self.city_state_regex.replace_all(company, "");
        let company = self.work_mode_regex.replace_all(&company, "");
        trim_separators(&company).to_string()
    }

    fn is_company_line(&self, line: &str, location: Option<&str>) -> bool {
        let stripped = self.strip_duration(line);
        let starts_ok = stripped
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());

        starts_ok
            && !self.is_bullet(line)
            && stripped.chars().count() <= MAX_COMPANY_CHARS
            && !stripped.ends_with('.')
            && location.map_or(true, |loc| stripped != loc)
    }

    fn strip_duration(&self, line: &str) -> String {
        trim_separators(&self.duration_regex.replace_all(line, "")).to_string()
    }
}

fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '-' | '–' | '—' | '(' | ')'))
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.trim().to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn placeholder_entry() -> ExperienceEntry {
    ExperienceEntry {
        title: DEFAULT_TITLE.to_string(),
        company: DEFAULT_COMPANY.to_string(),
        duration: DEFAULT_DURATION.to_string(),
        location: DEFAULT_LOCATION.to_string(),
        description: DEFAULT_DESCRIPTION.to_string(),
        achievements: vec![DEFAULT_ACHIEVEMENT.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ExperienceExtractor {
        ExperienceExtractor::default()
    }

    #[test]
    fn test_title_then_company_line() {
        let text = "EXPERIENCE\nSenior Backend Engineer\nAcme Corp\n2019 - Present\n• Reduced latency by 30%";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries.len(), 1);
        let job = &entries[0];
        assert_eq!(job.title, "Senior Backend Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.duration, "2019 - Present");
        assert_eq!(job.location, "Remote");
        assert_eq!(job.achievements, vec!["Reduced latency by 30%"]);
    }

    #[test]
    fn test_separators_and_multiple_jobs() {
        let text = "WORK EXPERIENCE\n\
            Software Engineer at Globex | Jan 2021 - Present\n\
            Austin, TX\n\
            Owned the billing platform used by every product team.\n\
            • Cut invoice errors by 40%\n\
            - Migrated jobs to Kubernetes\n\
            Data Analyst - Initech\n\
            2017 - 2020\n\
            * Built weekly revenue dashboards\n\
            EDUCATION\n\
            B.S. Statistics";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Software Engineer");
        assert_eq!(entries[0].company, "Globex");
        assert_eq!(entries[0].duration, "Jan 2021 - Present");
        assert_eq!(entries[0].location, "Austin, TX");
        assert_eq!(
            entries[0].description,
            "Owned the billing platform used by every product team."
        );
        assert_eq!(
            entries[0].achievements,
            vec!["Cut invoice errors by 40%", "Migrated jobs to Kubernetes"]
        );

        assert_eq!(entries[1].title, "Data Analyst");
        assert_eq!(entries[1].company, "Initech");
        assert_eq!(entries[1].duration, "2017 - 2020");
        assert_eq!(entries[1].achievements, vec!["Built weekly revenue dashboards"]);
    }

    #[test]
    fn test_location_stripped_from_company_and_work_mode() {
        let text = "EXPERIENCE\nProduct Manager\nHooli, San Francisco, CA\n2018 to 2021\n\nQA Engineer\nVandelay Industries  remote\n2015 - 2018";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries[0].company, "Hooli");
        assert_eq!(entries[0].location, "San Francisco, CA");
        assert_eq!(entries[0].duration, "2018 to 2021");
        assert_eq!(entries[1].location, "Remote");
        assert_eq!(entries[1].company, "Vandelay Industries");
    }

    #[test]
    fn test_company_written_above_title() {
        let text = "EXPERIENCE\nAcme Corp\nFrontend Developer\n2020 - 2022\n• Shipped the design system";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Frontend Developer");
        assert_eq!(entries[0].company, "Acme Corp");
    }

    #[test]
    fn test_missing_fields_get_entry_defaults() {
        let text = "EXPERIENCE\nLead Architect\nWorked across several platform initiatives";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries[0].title, "Lead Architect");
        assert_eq!(entries[0].duration, "2020 - Present");
        assert_eq!(entries[0].location, "Remote");
        assert_eq!(entries[0].achievements, vec!["Built modern web applications"]);
    }

    #[test]
    fn test_placeholder_when_nothing_parses() {
        let entries = extractor().extract_experience("");
        assert_eq!(entries, vec![placeholder_entry()]);

        let entries = extractor().extract_experience("x");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Tech Company");
    }

    #[test]
    fn test_capped_at_five_entries() {
        let mut text = String::from("EXPERIENCE\n");
        for i in 0..8 {
            text.push_str(&format!("Level {} Developer\nCompany Number {}\n", i, i));
        }
        let entries = extractor().extract_experience(&text);

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].title, "Level 0 Developer");
        assert_eq!(entries[4].company, "Company Number 4");
    }

    #[test]
    fn test_role_mentioned_in_description_does_not_start_a_job() {
        let text = "EXPERIENCE\n\
            Senior Backend Engineer at Acme Corp\n\
            2019 - Present\n\
            Partnered with product managers on the roadmap\n\
            • Reduced latency by 30%\n\
            • Cut costs by 10%";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(
            entries[0].description,
            "Partnered with product managers on the roadmap"
        );
        assert_eq!(
            entries[0].achievements,
            vec!["Reduced latency by 30%", "Cut costs by 10%"]
        );
    }

    #[test]
    fn test_pipe_separates_title_from_company() {
        let text = "EXPERIENCE\nStaff Engineer | Initech\n2016 - 2019\n• Scaled the TPS report pipeline";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Staff Engineer");
        assert_eq!(entries[0].company, "Initech");
        assert_eq!(entries[0].duration, "2016 - 2019");
    }

    #[test]
    fn test_document_preamble_is_not_a_job() {
        let text = "Jane Smith\njane@x.com\n\nSUMMARY\nBuilt distributed systems for payments teams\n\nSKILLS\nPython, Go";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries, vec![placeholder_entry()]);
    }

    #[test]
    fn test_heading_never_becomes_company() {
        let text = "EXPERIENCE\nSOFTWARE ENGINEER\nAcme Corp\n2019 - Present\n• Shipped billing";
        let entries = extractor().extract_experience(text);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "SOFTWARE ENGINEER");
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].duration, "2019 - Present");
    }
}
