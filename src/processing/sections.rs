//! Heading-based section segmentation

use regex::Regex;
use std::fmt;

/// Resume sections the extractors look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
}

// Longer aliases come first so "technical skills" wins over "skills".
const SUMMARY_ALIASES: &[&str] = &[
    "professional summary",
    "career summary",
    "summary",
    "about me",
    "about",
    "career objective",
    "objective",
    "professional profile",
    "profile",
    "overview",
];

const SKILLS_ALIASES: &[&str] = &[
    "technical skills",
    "core competencies",
    "key skills",
    "skills",
    "technologies",
    "competencies",
    "tech stack",
    "expertise",
];

const EXPERIENCE_ALIASES: &[&str] = &[
    "professional experience",
    "work experience",
    "experience",
    "work history",
    "employment history",
    "employment",
    "career history",
];

const PROJECTS_ALIASES: &[&str] = &[
    "personal projects",
    "key projects",
    "notable projects",
    "side projects",
    "projects",
    "portfolio",
];

const EDUCATION_ALIASES: &[&str] = &[
    "education",
    "academic background",
    "academic qualifications",
    "qualifications",
];

/// Headings that end a section without being extracted themselves.
const BOUNDARY_HEADINGS: &[&str] = &[
    "certifications",
    "certificates",
    "licenses",
    "awards",
    "honors",
    "achievements",
    "publications",
    "languages",
    "interests",
    "hobbies",
    "volunteer",
    "volunteering",
    "references",
    "contact",
    "contact information",
];

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Summary,
        SectionKind::Skills,
        SectionKind::Experience,
        SectionKind::Projects,
        SectionKind::Education,
    ];

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => SUMMARY_ALIASES,
            SectionKind::Skills => SKILLS_ALIASES,
            SectionKind::Experience => EXPERIENCE_ALIASES,
            SectionKind::Projects => PROJECTS_ALIASES,
            SectionKind::Education => EDUCATION_ALIASES,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::Summary => write!(f, "Summary"),
            SectionKind::Skills => write!(f, "Skills"),
            SectionKind::Experience => write!(f, "Experience"),
            SectionKind::Projects => write!(f, "Projects"),
            SectionKind::Education => write!(f, "Education"),
        }
    }
}

/// True when `text` (case-insensitive, optional trailing colon) is one of
/// the known section headings.
pub fn is_known_heading(text: &str) -> bool {
    let key = text.trim().trim_end_matches(':').trim().to_lowercase();
    if key.is_empty() {
        return false;
    }

    SectionKind::ALL
        .iter()
        .flat_map(|kind| kind.aliases().iter())
        .chain(BOUNDARY_HEADINGS.iter())
        .any(|heading| *heading == key)
}

/// Locates labeled sections in multi-line normalized text.
///
/// A section starts at a line beginning with one of the aliases (either on
/// its own, followed by `:` and inline content, or as part of an all-caps
/// heading) and runs until the next heading-like line or end of text.
pub struct SectionSegmenter {
    min_content_chars: usize,
    caps_heading_regex: Regex,
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new(10)
    }
}

impl SectionSegmenter {
    pub fn new(min_content_chars: usize) -> Self {
        let caps_heading_regex = Regex::new(r"^[A-Z][A-Z&/()' -]{3,48}:?$")
            .expect("Invalid caps heading regex");

        Self {
            min_content_chars,
            caps_heading_regex,
        }
    }

    /// Content of the first alias whose section has more than the minimum
    /// number of characters. Aliases are tried in order.
    pub fn find_section(&self, text: &str, heading_aliases: &[&str]) -> Option<String> {
        let lines: Vec<&str> = text.lines().collect();

        for alias in heading_aliases {
            for (line_idx, line) in lines.iter().enumerate() {
                let inline = match self.match_heading(line.trim(), alias) {
                    Some(inline) => inline,
                    None => continue,
                };

                let mut content: Vec<&str> = Vec::new();
                if !inline.is_empty() {
                    content.push(inline);
                }

                for next in &lines[line_idx + 1..] {
                    let trimmed = next.trim();
                    if self.is_heading_line(trimmed) {
                        break;
                    }
                    content.push(trimmed);
                }

                let section = content.join("\n").trim().to_string();
                if section.chars().count() > self.min_content_chars {
                    return Some(section);
                }
            }
        }

        None
    }

    pub fn find(&self, text: &str, kind: SectionKind) -> Option<String> {
        self.find_section(text, kind.aliases())
    }

    /// Heading-like lines terminate a section: known headings in any case,
    /// or short all-caps lines.
    pub fn is_heading_line(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        is_known_heading(line) || self.caps_heading_regex.is_match(line)
    }

    /// Returns the inline content following the heading (possibly empty) when
    /// `line` opens a section for `alias`.
    fn match_heading<'a>(&self, line: &'a str, alias: &str) -> Option<&'a str> {
        let alias_len = alias.len();
        if line.len() < alias_len
            || !line.is_char_boundary(alias_len)
            || !line[..alias_len].eq_ignore_ascii_case(alias)
        {
            return None;
        }

        let rest = &line[alias_len..];
        let rest_trimmed = rest.trim_start();

        if rest_trimmed.is_empty() {
            return Some("");
        }
        if let Some(inline) = rest_trimmed.strip_prefix(':') {
            return Some(inline.trim());
        }
        if rest.starts_with(' ') && self.caps_heading_regex.is_match(line) {
            return Some("");
        }

        None
    }
}
