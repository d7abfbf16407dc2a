//! Output formatters for extracted portfolio profiles

use crate::config::OutputFormat;
use crate::error::{PortfolioError, Result};
use crate::processing::profile::{ExperienceEntry, ResumeProfile, SkillCategory};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

const NAME_CTA: &str = "Add your name";
const SUMMARY_CTA: &str = "Add a short summary about yourself";

/// Trait for rendering an extracted profile
pub trait OutputFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_contact: bool,
}

/// Standalone portfolio page
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ProfileRenderer {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Skills of one category, in taxonomy order
struct SkillGroup {
    category: &'static str,
    skills: Vec<String>,
}

fn group_skills(profile: &ResumeProfile) -> Vec<SkillGroup> {
    SkillCategory::ALL
        .iter()
        .filter_map(|category| {
            let skills: Vec<String> = profile
                .skills
                .iter()
                .filter(|skill| skill.category == *category)
                .map(|skill| skill.name.clone())
                .collect();
            (!skills.is_empty()).then(|| SkillGroup {
                category: category.as_str(),
                skills,
            })
        })
        .collect()
}

fn display_name(profile: &ResumeProfile) -> &str {
    if profile.name.is_empty() {
        NAME_CTA
    } else {
        &profile.name
    }
}

fn display_summary(profile: &ResumeProfile) -> &str {
    if profile.summary.is_empty() {
        SUMMARY_CTA
    } else {
        &profile.summary
    }
}

fn profile_links(profile: &ResumeProfile) -> Vec<HtmlLink> {
    [
        ("GitHub", &profile.links.github),
        ("LinkedIn", &profile.links.linkedin),
        ("Website", &profile.links.website),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        url.as_ref().map(|url| HtmlLink {
            label,
            url: url.clone(),
        })
    })
    .collect()
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ name }} | Portfolio</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .hero {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .cta { color: #6c757d; font-style: italic; }
        .section { margin: 25px 0; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        .skill {
            display: inline-block;
            padding: 4px 12px;
            margin: 3px;
            border-radius: 14px;
            background: #e7f1fa;
        }
        .entry {
            background: #f8f9fa;
            padding: 15px;
            margin: 10px 0;
            border-radius: 6px;
            border-left: 4px solid #007acc;
        }
        .meta { color: #6c757d; font-size: 0.9em; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="hero">
            <h1{% if !has_name %} class="cta"{% endif %}>{{ name }}</h1>
            <p><strong>{{ title }}</strong></p>
            <p class="meta">
                <a href="mailto:{{ email }}">{{ email }}</a>
                {% if !phone.is_empty() %} | {{ phone }}{% endif %}
                {% for link in links %} | <a href="{{ link.url }}">{{ link.label }}</a>{% endfor %}
            </p>
        </div>

        <div class="section">
            <h2>About</h2>
            <p{% if !has_summary %} class="cta"{% endif %}>{{ summary }}</p>
        </div>

        <div class="section">
            <h2>Skills</h2>
            {% for group in skill_groups %}
            <h3>{{ group.category }}</h3>
            <div>{% for skill in group.skills %}<span class="skill">{{ skill }}</span>{% endfor %}</div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Experience</h2>
            {% for job in experience %}
            <div class="entry">
                <h3>{{ job.title }} at {{ job.company }}</h3>
                <p class="meta">{{ job.duration }} | {{ job.location }}</p>
                <p>{{ job.description }}</p>
                <ul>{% for achievement in job.achievements %}<li>{{ achievement }}</li>{% endfor %}</ul>
            </div>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Projects</h2>
            {% for project in projects %}
            <div class="entry">
                <h3>{{ project.title }}</h3>
                <p>{{ project.description }}</p>
                <p class="meta">{{ project.technologies }}</p>
                {% if !project.link.is_empty() %}<a href="{{ project.link }}">{{ project.link }}</a>{% endif %}
            </div>
            {% endfor %}
        </div>

        {% if !education.is_empty() %}
        <div class="section">
            <h2>Education</h2>
            {% for entry in education %}
            <div class="entry">
                <h3>{{ entry.degree }}</h3>
                <p class="meta">{{ entry.school }}{% if !entry.year.is_empty() %} | {{ entry.year }}{% endif %}</p>
            </div>
            {% endfor %}
        </div>
        {% endif %}

        <div class="section">
            <h2>Contact</h2>
            <p><a href="mailto:{{ email }}">{{ email }}</a></p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct PortfolioPage {
    include_styles: bool,
    name: String,
    has_name: bool,
    title: String,
    email: String,
    phone: String,
    links: Vec<HtmlLink>,
    summary: String,
    has_summary: bool,
    skill_groups: Vec<SkillGroup>,
    experience: Vec<ExperienceEntry>,
    projects: Vec<HtmlProject>,
    education: Vec<HtmlEducation>,
}

struct HtmlLink {
    label: &'static str,
    url: String,
}

struct HtmlProject {
    title: String,
    description: String,
    technologies: String,
    link: String,
}

struct HtmlEducation {
    degree: String,
    school: String,
    year: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_cta(&self, text: &str) -> String {
        if self.use_colors {
            text.dimmed().italic().to_string()
        } else {
            format!("[{}]", text)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        let mut output = String::new();

        let name = if profile.name.is_empty() {
            self.format_cta(NAME_CTA)
        } else {
            self.colorize(&profile.name, Color::Cyan)
        };
        output.push_str(&self.format_header("PORTFOLIO PROFILE", 1));
        output.push_str(&format!("{}\n{}\n", name, profile.title));
        output.push_str(&format!("Email: {}\n", profile.email));
        if let Some(phone) = &profile.phone {
            output.push_str(&format!("Phone: {}\n", phone));
        }
        for link in profile_links(profile) {
            output.push_str(&format!("{}: {}\n", link.label, link.url));
        }

        output.push_str(&self.format_header("About", 2));
        if profile.summary.is_empty() {
            output.push_str(&format!("{}\n", self.format_cta(SUMMARY_CTA)));
        } else {
            output.push_str(&format!("{}\n", profile.summary));
        }

        output.push_str(&self.format_header("Skills", 2));
        for group in group_skills(profile) {
            output.push_str(&format!(
                "{}: {}\n",
                self.colorize(group.category, Color::Yellow),
                group.skills.join(", ")
            ));
        }

        output.push_str(&self.format_header("Experience", 2));
        for job in &profile.experience {
            output.push_str(&format!(
                "{} @ {} ({})\n",
                self.colorize(&job.title, Color::Green),
                job.company,
                job.duration
            ));
            if self.detailed {
                output.push_str(&format!("  {} | {}\n", job.location, job.description));
                for achievement in &job.achievements {
                    output.push_str(&format!("  • {}\n", achievement));
                }
            }
        }

        output.push_str(&self.format_header("Projects", 2));
        for project in &profile.projects {
            output.push_str(&format!(
                "{} - {}\n",
                self.colorize(&project.title, Color::Green),
                project.description
            ));
            if self.detailed {
                output.push_str(&format!("  Tech: {}\n", project.technologies.join(", ")));
                if let Some(link) = &project.link {
                    output.push_str(&format!("  Link: {}\n", link));
                }
            }
        }

        if self.detailed && !profile.education.is_empty() {
            output.push_str(&self.format_header("Education", 2));
            for entry in &profile.education {
                let year = entry.year.as_deref().map(|y| format!(" ({})", y)).unwrap_or_default();
                output.push_str(&format!("{}, {}{}\n", entry.degree, entry.school, year));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(profile)?)
        } else {
            Ok(serde_json::to_string(profile)?)
        }
    }
}

impl MarkdownFormatter {
    pub fn new(include_contact: bool) -> Self {
        Self { include_contact }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# {}\n\n", display_name(profile)));
        output.push_str(&format!("**{}**\n\n", profile.title));

        output.push_str("## About\n\n");
        output.push_str(&format!("{}\n\n", display_summary(profile)));

        output.push_str("## Skills\n\n");
        for group in group_skills(profile) {
            output.push_str(&format!("- **{}:** {}\n", group.category, group.skills.join(", ")));
        }
        output.push('\n');

        output.push_str("## Experience\n\n");
        for job in &profile.experience {
            output.push_str(&format!("### {} at {}\n\n", job.title, job.company));
            output.push_str(&format!("*{} | {}*\n\n", job.duration, job.location));
            output.push_str(&format!("{}\n\n", job.description));
            for achievement in &job.achievements {
                output.push_str(&format!("- {}\n", achievement));
            }
            output.push('\n');
        }

        output.push_str("## Projects\n\n");
        for project in &profile.projects {
            match &project.link {
                Some(link) => output.push_str(&format!("### [{}]({})\n\n", project.title, link)),
                None => output.push_str(&format!("### {}\n\n", project.title)),
            }
            output.push_str(&format!("{}\n\n", project.description));
            output.push_str(&format!("`{}`\n\n", project.technologies.join("` `")));
        }

        if !profile.education.is_empty() {
            output.push_str("## Education\n\n");
            for entry in &profile.education {
                let year = entry.year.as_deref().map(|y| format!(" ({})", y)).unwrap_or_default();
                output.push_str(&format!("- **{}**, {}{}\n", entry.degree, entry.school, year));
            }
            output.push('\n');
        }

        if self.include_contact {
            output.push_str("## Contact\n\n");
            output.push_str(&format!("- Email: {}\n", profile.email));
            if let Some(phone) = &profile.phone {
                output.push_str(&format!("- Phone: {}\n", phone));
            }
            for link in profile_links(profile) {
                output.push_str(&format!("- {}: <{}>\n", link.label, link.url));
            }
        }

        Ok(output)
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_page(&self, profile: &ResumeProfile) -> PortfolioPage {
        PortfolioPage {
            include_styles: self.include_styles,
            name: display_name(profile).to_string(),
            has_name: !profile.name.is_empty(),
            title: profile.title.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone().unwrap_or_default(),
            links: profile_links(profile),
            summary: display_summary(profile).to_string(),
            has_summary: !profile.summary.is_empty(),
            skill_groups: group_skills(profile),
            experience: profile.experience.clone(),
            projects: profile
                .projects
                .iter()
                .map(|project| HtmlProject {
                    title: project.title.clone(),
                    description: project.description.clone(),
                    technologies: project.technologies.join(" · "),
                    link: project.link.clone().unwrap_or_default(),
                })
                .collect(),
            education: profile
                .education
                .iter()
                .map(|entry| HtmlEducation {
                    degree: entry.degree.clone(),
                    school: entry.school.clone(),
                    year: entry.year.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_profile(&self, profile: &ResumeProfile) -> Result<String> {
        self.create_page(profile)
            .render()
            .map_err(|e| PortfolioError::OutputFormatting(e.to_string()))
    }
}

impl ProfileRenderer {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn render(&self, profile: &ResumeProfile, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_profile(profile),
            OutputFormat::Json => self.json_formatter.format_profile(profile),
            OutputFormat::Markdown => self.markdown_formatter.format_profile(profile),
            OutputFormat::Html => self.html_formatter.format_profile(profile),
        }
    }
}

impl Default for ProfileRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, source_name: &str) -> String {
    let base_name = Path::new(source_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    match format {
        OutputFormat::Console => format!("{}_portfolio.txt", base_name),
        OutputFormat::Json => format!("{}_portfolio.json", base_name),
        OutputFormat::Markdown => format!("{}_portfolio.md", base_name),
        OutputFormat::Html => format!("{}_portfolio.html", base_name),
    }
}
