//! Project extraction

use crate::config::ExtractionConfig;
use crate::processing::normalizer::leading_chars;
use crate::processing::profile::ProjectEntry;
use crate::processing::sections::{SectionKind, SectionSegmenter};
use crate::processing::skills::KeywordScanner;
use log::debug;
use regex::Regex;
use std::collections::HashSet;

const DEFAULT_DESCRIPTION: &str = "Project showcasing technical skills";
const DEFAULT_TECHNOLOGIES: &[&str] = &["React", "TypeScript"];

const MAX_START_LINE_CHARS: usize = 80;
const MIN_BLOCK_CHARS: usize = 10;
const MIN_DESCRIPTION_CHARS: usize = 20;
const MAX_TECH_CHARS: usize = 30;

pub struct ProjectsExtractor {
    max_entries: usize,
    tech_window_chars: usize,
    repo_owner: String,
    segmenter: SectionSegmenter,
    scanner: KeywordScanner,
    noun_regex: Regex,
    project_label_regex: Regex,
    bullet_label_regex: Regex,
    tech_list_regex: Regex,
    tech_split_regex: Regex,
    title_split_regex: Regex,
    url_regex: Regex,
    bullet_regex: Regex,
}

impl Default for ProjectsExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl ProjectsExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            max_entries: config.max_project_entries,
            tech_window_chars: config.project_tech_window_chars,
            repo_owner: config.placeholder_repo_owner.clone(),
            segmenter: SectionSegmenter::new(config.min_section_chars),
            scanner: KeywordScanner::default(),
            noun_regex: Regex::new(
                r"(?i)\b(?:project|app|application|website|site|system|platform|tool|dashboard|api|bot|engine|library|game|extension)s?$",
            )
            .expect("Invalid project noun regex"),
            project_label_regex: Regex::new(r"(?i)^project[ \t]*(?:#?[0-9]+)?[ \t]*:[ \t]*")
                .expect("Invalid project label regex"),
            bullet_label_regex: Regex::new(r"^[•*\-][ \t]*[A-Z][A-Za-z0-9 .&'+#/-]{1,50}:")
                .expect("Invalid bullet label regex"),
            tech_list_regex: Regex::new(
                r"(?i)^(?:[•*\-][ \t]*)?(?:technologies|technology|tech stack|stack|built with|tools|using)[ \t]*:[ \t]*(.+)$",
            )
            .expect("Invalid tech list regex"),
            tech_split_regex: Regex::new(r"[,;|•]").expect("Invalid tech split regex"),
            title_split_regex: Regex::new(r"[ \t]+[-–|][ \t]+|:[ \t]+").expect("Invalid title split regex"),
            url_regex: Regex::new(r#"https?://[^\s<>()\[\]"',]+"#).expect("Invalid URL regex"),
            bullet_regex: Regex::new(r"^[•*\-][ \t]*").expect("Invalid bullet regex"),
        }
    }

    /// Projects from the projects section (or the whole document when there
    /// is none), in document order. Never empty.
    pub fn extract_projects(&self, text: &str) -> Vec<ProjectEntry> {
        let section = self.segmenter.find(text, SectionKind::Projects);
        let blocks = match section.as_deref() {
            Some(section) => {
                let blocks = self.split_blocks(section);
                if blocks.is_empty() {
                    vec![section.lines().map(str::trim).filter(|l| !l.is_empty()).collect()]
                } else {
                    blocks
                }
            }
            None => {
                debug!("No projects section, scanning whole document");
                self.split_blocks(text)
            }
        };

        let projects: Vec<ProjectEntry> = blocks
            .iter()
            .filter(|block| block.iter().map(|l| l.chars().count()).sum::<usize>() > MIN_BLOCK_CHARS)
            .filter_map(|block| self.parse_block(block))
            .take(self.max_entries)
            .collect();

        if projects.is_empty() {
            debug!("No project blocks found, using placeholder project");
            return vec![self.placeholder_project()];
        }

        projects
    }

    fn is_project_start(&self, line: &str) -> bool {
        if line.chars().count() > MAX_START_LINE_CHARS
            || line.ends_with('.')
            || self.tech_list_regex.is_match(line)
        {
            return false;
        }

        self.names_project(line)
            || self.project_label_regex.is_match(line)
            || self.bullet_label_regex.is_match(line)
    }

    /// A capitalized title phrase ending in a project noun, where the phrase
    /// runs up to the first ` - `, `|` or `:` separator.
    fn names_project(&self, line: &str) -> bool {
        if !line.chars().next().is_some_and(char::is_uppercase) {
            return false;
        }

        let phrase = match self.title_split_regex.find(line) {
            Some(sep) => &line[..sep.start()],
            None => line,
        };
        let phrase = self.url_regex.replace_all(phrase, "");
        self.noun_regex.is_match(phrase.trim())
    }

    fn split_blocks<'a>(&self, text: &'a str) -> Vec<Vec<&'a str>> {
        let mut blocks: Vec<Vec<&str>> = Vec::new();

        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if self.is_project_start(line) {
                blocks.push(vec![line]);
            } else if let Some(current) = blocks.last_mut() {
                current.push(line);
            }
        }

        blocks
    }

    fn parse_block(&self, lines: &[&str]) -> Option<ProjectEntry> {
        let first = lines.first()?;
        let header = self.bullet_regex.replace(first, "");
        let header = self.project_label_regex.replace(&header, "");
        let header = self.url_regex.replace_all(&header, "");
        let header = header.trim().trim_end_matches(':').trim();

        let (title, inline_description) = match self.title_split_regex.find(header) {
            Some(sep) => (
                header[..sep.start()].trim().to_string(),
                header[sep.end()..].trim().to_string(),
            ),
            None => (header.to_string(), String::new()),
        };

        let length = title.chars().count();
        if !(3..=60).contains(&length) || title.to_lowercase().contains("experience") {
            debug!("Discarding project candidate '{}'", title);
            return None;
        }

        let description = if inline_description.chars().count() > 3 {
            inline_description
        } else {
            lines[1..]
                .iter()
                .map(|line| self.bullet_regex.replace(line, "").trim().to_string())
                .find(|line| {
                    line.chars().count() > MIN_DESCRIPTION_CHARS
                        && !self.tech_list_regex.is_match(line)
                        && !self.url_regex.is_match(line)
                })
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string())
        };

        let link = lines
            .iter()
            .find_map(|line| self.url_regex.find(line))
            .map(|m| m.as_str().trim_end_matches(['.', ';', ':', '/']).to_string())
            .unwrap_or_else(|| format!("https://github.com/{}/{}", self.repo_owner, slugify(&title)));

        Some(ProjectEntry {
            technologies: self.technologies(lines),
            title,
            description,
            link: Some(link),
        })
    }

    /// Explicit `Technologies:` lists first, then keywords near the title.
    fn technologies(&self, lines: &[&str]) -> Vec<String> {
        let mut technologies = Vec::new();
        let mut seen = HashSet::new();

        let explicit = lines
            .iter()
            .filter_map(|line| self.tech_list_regex.captures(line))
            .flat_map(|caps| {
                self.tech_split_regex
                    .split(&caps[1])
                    .map(|t| t.trim().trim_end_matches('.').trim().to_string())
                    .collect::<Vec<_>>()
            });

        let body = lines[1..].join("\n");
        let window = format!("{}\n{}", lines[0], leading_chars(&body, self.tech_window_chars));
        let scanned = self.scanner.scan(&window).into_iter().map(str::to_string);

        for tech in explicit.chain(scanned) {
            let length = tech.chars().count();
            if length == 0 || length > MAX_TECH_CHARS {
                continue;
            }
            if seen.insert(tech.to_lowercase()) {
                technologies.push(tech);
            }
        }

        if technologies.is_empty() {
            return DEFAULT_TECHNOLOGIES.iter().map(|t| t.to_string()).collect();
        }
        technologies
    }

    fn placeholder_project(&self) -> ProjectEntry {
        ProjectEntry {
            title: "Portfolio Website".to_string(),
            description: "Modern portfolio showcasing technical skills".to_string(),
            technologies: DEFAULT_TECHNOLOGIES.iter().map(|t| t.to_string()).collect(),
            link: Some(format!("https://github.com/{}/portfolio", self.repo_owner)),
        }
    }
}

/// Lowercase ASCII slug with single dashes, `project` when nothing survives.
fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ProjectsExtractor {
        ProjectsExtractor::default()
    }

    #[test]
    fn test_projects_section_with_separators() {
        let text = "PROJECTS\n\
            Weather Dashboard - Real-time forecasts for 200 cities\n\
            Technologies: React, D3.js, Redis\n\
            https://github.com/jane/weather\n\
            Chat Bot | Slack assistant answering support questions\n\
            Built with Python and FastAPI on AWS Lambda functions\n\
            EDUCATION\n\
            B.S. Computer Science";
        let projects = extractor().extract_projects(text);

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Weather Dashboard");
        assert_eq!(projects[0].description, "Real-time forecasts for 200 cities");
        assert_eq!(projects[0].technologies, vec!["React", "D3.js", "Redis"]);
        assert_eq!(projects[0].link.as_deref(), Some("https://github.com/jane/weather"));

        assert_eq!(projects[1].title, "Chat Bot");
        assert_eq!(projects[1].technologies, vec!["Python", "FastAPI", "AWS"]);
        assert_eq!(
            projects[1].link.as_deref(),
            Some("https://github.com/username/chat-bot")
        );
    }

    #[test]
    fn test_labeled_and_bulleted_starts() {
        let text = "PERSONAL PROJECTS\n\
            Project 1: Budget Tracker\n\
            Tracks household spending with monthly reports and alerts\n\
            • Recipe Finder: search recipes by ingredient\n\
            Uses TypeScript and Next.js";
        let projects = extractor().extract_projects(text);

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Budget Tracker");
        assert_eq!(
            projects[0].description,
            "Tracks household spending with monthly reports and alerts"
        );
        assert_eq!(projects[0].technologies, vec!["React", "TypeScript"]);
        assert_eq!(projects[1].title, "Recipe Finder");
        assert_eq!(projects[1].description, "search recipes by ingredient");
        assert_eq!(projects[1].technologies, vec!["TypeScript", "Next.js"]);
    }

    #[test]
    fn test_section_without_start_lines_is_one_block() {
        let text = "PORTFOLIO\nOpen source contributor to tokio\nMaintains a small Rust crate";
        let projects = extractor().extract_projects(text);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Open source contributor to tokio");
        assert_eq!(projects[0].description, "Maintains a small Rust crate");
    }

    #[test]
    fn test_filters_false_positive_titles() {
        let text = "PROJECTS\nAI: x\nExperience Platform - internal tooling for everyone";
        let projects = extractor().extract_projects(text);

        assert_eq!(projects, vec![extractor().placeholder_project()]);
    }

    #[test]
    fn test_placeholder_for_empty_input() {
        let projects = extractor().extract_projects("");

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Portfolio Website");
        assert_eq!(projects[0].link.as_deref(), Some("https://github.com/username/portfolio"));
    }

    #[test]
    fn test_capped_at_five() {
        let mut text = String::from("PROJECTS\n");
        for i in 0..7 {
            text.push_str(&format!("Number {} Tool - does thing {}\n", i, i));
        }
        assert_eq!(extractor().extract_projects(&text).len(), 5);
    }

    #[test]
    fn test_title_length_bounds() {
        let text = "PROJECTS\n\
            Project 1: UI\n\
            Project 2: Zed\n\
            Project 3: Distributed Tracing Toolkit For Hobbyist Embedded Rust Board\n\
            Project 4: Distributed Tracing Toolkit For Hobbyist Embedded Rust Boards";
        let titles: Vec<String> = extractor()
            .extract_projects(text)
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(
            titles,
            vec![
                "Zed",
                "Distributed Tracing Toolkit For Hobbyist Embedded Rust Board"
            ]
        );
    }

    #[test]
    fn test_noun_inside_a_sentence_is_not_a_project() {
        let text = "Jane Smith\n\
            Senior Platform Engineer\n\
            \n\
            SUMMARY\n\
            Built distributed systems for payments teams\n\
            \n\
            EXPERIENCE\n\
            Senior Platform Engineer at Acme\n\
            2019 - Present";
        let projects = extractor().extract_projects(text);

        assert_eq!(projects, vec![extractor().placeholder_project()]);
    }

    #[test]
    fn test_whole_document_fallback_finds_project_lines() {
        let text = "Jane Smith\n\
            Inventory Tracker App - Flask service for a local bakery\n\
            Used by three stores to reorder flour every week";
        let projects = extractor().extract_projects(text);

        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Inventory Tracker App");
        assert_eq!(projects[0].description, "Flask service for a local bakery");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Chat Bot"), "chat-bot");
        assert_eq!(slugify("  C++ / Rust Engine!  "), "c-rust-engine");
        assert_eq!(slugify("???"), "project");
    }
}
