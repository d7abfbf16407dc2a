//! Structured resume profile produced by the extraction pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// The pipeline's sole output. Built once per document and never mutated
/// by this crate; editing copies belong to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    /// Empty when the document has no recognizable name. Never derived from
    /// the uploaded filename.
    pub name: String,
    pub title: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub links: ProfileLinks,
    pub summary: String,
    pub skills: Vec<Skill>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
}

impl Skill {
    pub fn new(name: impl Into<String>, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Fixed skill taxonomy. `ProfessionalSkills` is the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCategory {
    #[serde(rename = "Programming Languages")]
    ProgrammingLanguages,
    #[serde(rename = "Frontend")]
    Frontend,
    #[serde(rename = "Backend")]
    Backend,
    #[serde(rename = "Database")]
    Database,
    #[serde(rename = "Cloud & DevOps")]
    CloudDevOps,
    #[serde(rename = "Mobile")]
    Mobile,
    #[serde(rename = "Data & Analytics")]
    DataAnalytics,
    #[serde(rename = "Finance & Accounting")]
    FinanceAccounting,
    #[serde(rename = "Marketing & Sales")]
    MarketingSales,
    #[serde(rename = "Design & Creative")]
    DesignCreative,
    #[serde(rename = "Engineering & CAD")]
    EngineeringCad,
    #[serde(rename = "Project Management")]
    ProjectManagement,
    #[serde(rename = "Communication & Languages")]
    CommunicationLanguages,
    #[serde(rename = "Tools & Software")]
    ToolsSoftware,
    #[serde(rename = "Soft Skills")]
    SoftSkills,
    #[serde(rename = "Professional Skills")]
    ProfessionalSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 16] = [
        SkillCategory::ProgrammingLanguages,
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::CloudDevOps,
        SkillCategory::Mobile,
        SkillCategory::DataAnalytics,
        SkillCategory::FinanceAccounting,
        SkillCategory::MarketingSales,
        SkillCategory::DesignCreative,
        SkillCategory::EngineeringCad,
        SkillCategory::ProjectManagement,
        SkillCategory::CommunicationLanguages,
        SkillCategory::ToolsSoftware,
        SkillCategory::SoftSkills,
        SkillCategory::ProfessionalSkills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "Programming Languages",
            SkillCategory::Frontend => "Frontend",
            SkillCategory::Backend => "Backend",
            SkillCategory::Database => "Database",
            SkillCategory::CloudDevOps => "Cloud & DevOps",
            SkillCategory::Mobile => "Mobile",
            SkillCategory::DataAnalytics => "Data & Analytics",
            SkillCategory::FinanceAccounting => "Finance & Accounting",
            SkillCategory::MarketingSales => "Marketing & Sales",
            SkillCategory::DesignCreative => "Design & Creative",
            SkillCategory::EngineeringCad => "Engineering & CAD",
            SkillCategory::ProjectManagement => "Project Management",
            SkillCategory::CommunicationLanguages => "Communication & Languages",
            SkillCategory::ToolsSoftware => "Tools & Software",
            SkillCategory::SoftSkills => "Soft Skills",
            SkillCategory::ProfessionalSkills => "Professional Skills",
        }
    }

    /// Map an explicit resume label such as `Frontend:` or `Databases:` to a
    /// category. Unknown labels return `None` so items get auto-categorized.
    pub fn from_label(label: &str) -> Option<SkillCategory> {
        let key = label
            .trim()
            .trim_end_matches(':')
            .to_lowercase()
            .replace(" and ", " & ");
        let key = key.split_whitespace().collect::<Vec<_>>().join(" ");

        if let Some(category) = Self::ALL
            .iter()
            .find(|c| c.as_str().to_lowercase() == key)
        {
            return Some(*category);
        }

        let category = match key.as_str() {
            "programming" | "coding" | "programming languages & frameworks" => {
                SkillCategory::ProgrammingLanguages
            }
            "front-end" | "front end" | "frontend development" | "ui" => SkillCategory::Frontend,
            "back-end" | "back end" | "server-side" | "backend development" => {
                SkillCategory::Backend
            }
            "databases" | "data stores" | "storage" => SkillCategory::Database,
            "cloud" | "devops" | "cloud/devops" | "infrastructure" | "cloud & infrastructure" => {
                SkillCategory::CloudDevOps
            }
            "mobile development" => SkillCategory::Mobile,
            "data" | "analytics" | "data science" | "machine learning" | "data & ml" => {
                SkillCategory::DataAnalytics
            }
            "finance" | "accounting" => SkillCategory::FinanceAccounting,
            "marketing" | "sales" => SkillCategory::MarketingSales,
            "design" | "creative" | "design tools" => SkillCategory::DesignCreative,
            "engineering" | "cad" => SkillCategory::EngineeringCad,
            "methodologies" | "management" => SkillCategory::ProjectManagement,
            "communication" | "spoken languages" => SkillCategory::CommunicationLanguages,
            "tools" | "software" | "tools & platforms" | "developer tools" => {
                SkillCategory::ToolsSoftware
            }
            "soft" | "interpersonal" | "interpersonal skills" => SkillCategory::SoftSkills,
            _ => return None,
        };
        Some(category)
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ProfileLinks {
    pub fn is_empty(&self) -> bool {
        self.github.is_none() && self.linkedin.is_none() && self.website.is_none()
    }
}
