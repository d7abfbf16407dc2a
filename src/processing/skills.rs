//! Skill extraction and categorization

use crate::config::ExtractionConfig;
use crate::processing::profile::{Skill, SkillCategory};
use crate::processing::sections::{SectionKind, SectionSegmenter};
use aho_corasick::{AhoCorasick, MatchKind};
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// A keyword the full-document scan looks for.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub name: &'static str,
    /// Short or common-word keywords (Go, Rust, Spark) only count when
    /// written with their canonical capitalization.
    pub case_sensitive: bool,
}

const fn kw(name: &'static str) -> Keyword {
    Keyword {
        name,
        case_sensitive: false,
    }
}

const fn cs(name: &'static str) -> Keyword {
    Keyword {
        name,
        case_sensitive: true,
    }
}

pub const SKILL_KEYWORDS: &[Keyword] = &[
    // Languages
    kw("JavaScript"),
    kw("TypeScript"),
    kw("Python"),
    kw("Java"),
    kw("C++"),
    kw("C#"),
    cs("Go"),
    cs("Rust"),
    kw("PHP"),
    cs("Ruby"),
    kw("Kotlin"),
    cs("Swift"),
    kw("Scala"),
    // Frontend
    kw("React"),
    kw("Angular"),
    kw("Vue"),
    kw("Next.js"),
    kw("HTML"),
    kw("CSS"),
    cs("Sass"),
    kw("Tailwind"),
    cs("Bootstrap"),
    kw("Redux"),
    // Backend
    kw("Node.js"),
    cs("Express"),
    kw("Django"),
    cs("Flask"),
    cs("Spring"),
    kw("Laravel"),
    kw("GraphQL"),
    kw(".NET"),
    kw("FastAPI"),
    // Databases
    kw("SQL"),
    kw("MySQL"),
    kw("PostgreSQL"),
    kw("MongoDB"),
    kw("Redis"),
    kw("SQLite"),
    kw("Elasticsearch"),
    kw("DynamoDB"),
    // Cloud & DevOps
    kw("AWS"),
    kw("Azure"),
    kw("GCP"),
    kw("Docker"),
    kw("Kubernetes"),
    kw("Terraform"),
    kw("Jenkins"),
    kw("Linux"),
    kw("CI/CD"),
    // Mobile
    kw("React Native"),
    kw("Flutter"),
    kw("Android"),
    kw("iOS"),
    // Data
    cs("Pandas"),
    kw("NumPy"),
    kw("TensorFlow"),
    kw("PyTorch"),
    kw("Machine Learning"),
    kw("Tableau"),
    kw("Power BI"),
    cs("Spark"),
    // Tools
    kw("Git"),
    kw("Jira"),
    kw("Figma"),
    cs("Excel"),
    // Professional
    kw("Agile"),
    kw("Scrum"),
    kw("Leadership"),
    kw("Communication"),
    kw("Project Management"),
];

/// Returned when neither the skills section nor the keyword scan finds
/// anything.
const DEFAULT_SKILLS: &[&str] = &["JavaScript", "React", "Node.js"];

const STOPWORDS: &[&str] = &[
    "and",
    "or",
    "with",
    "using",
    "including",
    "in",
    "of",
    "the",
    "a",
    "an",
    "experience",
    "years",
    "proficient",
    "familiar",
    "knowledge",
    "strong",
    "excellent",
    "good",
    "etc",
    "skills",
];

/// Finds whole-word occurrences of a fixed keyword table.
pub struct KeywordScanner {
    keywords: &'static [Keyword],
    matcher: AhoCorasick,
}

impl Default for KeywordScanner {
    fn default() -> Self {
        Self::new(SKILL_KEYWORDS)
    }
}

impl KeywordScanner {
    pub fn new(keywords: &'static [Keyword]) -> Self {
        let patterns: Vec<&str> = keywords.iter().map(|k| k.name).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .expect("Invalid keyword table");

        Self { keywords, matcher }
    }

    /// Keywords present in `text`, in table order, each at most once.
    pub fn scan(&self, text: &str) -> Vec<&'static str> {
        let mut found = vec![false; self.keywords.len()];

        for mat in self.matcher.find_iter(text) {
            let keyword = &self.keywords[mat.pattern().as_usize()];
            let matched = &text[mat.start()..mat.end()];

            if keyword.case_sensitive && matched != keyword.name {
                continue;
            }
            if !is_word_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            found[mat.pattern().as_usize()] = true;
        }

        self.keywords
            .iter()
            .zip(found)
            .filter(|(_, hit)| *hit)
            .map(|(keyword, _)| keyword.name)
            .collect()
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = text[end..]
        .chars()
        .next()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '+' || c == '#'));
    before_ok && after_ok
}

struct CategoryRule {
    category: SkillCategory,
    pattern: Regex,
}

/// Ordered category rules; the first match wins and unmatched names fall
/// into [`SkillCategory::ProfessionalSkills`].
pub struct SkillCategorizer {
    rules: Vec<CategoryRule>,
}

impl Default for SkillCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillCategorizer {
    pub fn new() -> Self {
        let rule = |category, pattern: &str| CategoryRule {
            category,
            pattern: Regex::new(&format!("(?i){}", pattern)).expect("Invalid category regex"),
        };

        // Technical categories match the whole name; professional domains
        // match a word anywhere in it.
        let rules = vec![
            rule(
                SkillCategory::ProgrammingLanguages,
                r"^(?:javascript|typescript|js|ts|python|java|c|c\+\+|c#|go|golang|rust|php|ruby|kotlin|swift|scala|r|perl|dart|elixir|haskell|lua|matlab|objective-c|bash|shell|powershell|clojure|f#|julia|groovy)$",
            ),
            rule(
                SkillCategory::Frontend,
                r"^(?:react|react\.js|reactjs|angular|angularjs|vue|vue\.js|vuejs|svelte|next\.js|nextjs|nuxt|nuxt\.js|html|html5|css|css3|sass|scss|less|tailwind|tailwind css|tailwindcss|bootstrap|redux|jquery|webpack|vite|material ui|gatsby)$",
            ),
            rule(
                SkillCategory::Backend,
                r"^(?:node\.js|nodejs|node|express|express\.js|django|flask|spring|spring boot|laravel|rails|ruby on rails|graphql|\.net|\.net core|asp\.net|fastapi|nestjs|nest\.js|rest|rest apis?|restful apis?|grpc|microservices|koa|gin|actix)$",
            ),
            rule(
                SkillCategory::Database,
                r"^(?:sql|nosql|mysql|postgresql|postgres|mongodb|mongo|redis|sqlite|elasticsearch|dynamodb|oracle|sql server|mssql|mariadb|cassandra|firebase|firestore|neo4j|supabase|couchdb|snowflake)$",
            ),
            rule(
                SkillCategory::CloudDevOps,
                r"^(?:aws|amazon web services|azure|gcp|google cloud|docker|kubernetes|k8s|terraform|jenkins|linux|ci/cd|ansible|github actions|gitlab ci|circleci|helm|nginx|heroku|vercel|netlify|cloudformation|serverless|lambda|prometheus|grafana|openshift)$",
            ),
            rule(
                SkillCategory::Mobile,
                r"^(?:react native|flutter|android|ios|swiftui|xamarin|ionic|expo|jetpack compose)$",
            ),
            rule(
                SkillCategory::DataAnalytics,
                r"^(?:pandas|numpy|tensorflow|pytorch|machine learning|deep learning|tableau|power bi|spark|apache spark|hadoop|scikit-learn|sklearn|keras|data analysis|data visualization|statistics|nlp|computer vision|airflow|kafka|matplotlib|jupyter|looker|etl|big data|data science|ai|artificial intelligence)$",
            ),
            rule(
                SkillCategory::FinanceAccounting,
                r"\b(?:accounting|bookkeeping|budget|budgeting|financial|finance|forecasting|audit|auditing|tax|taxation|payroll|gaap|ifrs|quickbooks|accounts payable|accounts receivable|reconciliation|valuation|cpa)\b",
            ),
            rule(
                SkillCategory::MarketingSales,
                r"\b(?:marketing|seo|sem|sales|crm|salesforce|hubspot|branding|social media|content strategy|copywriting|google analytics|lead generation|advertising|e-?commerce|market research|public relations)\b",
            ),
            rule(
                SkillCategory::DesignCreative,
                r"\b(?:figma|sketch|adobe|photoshop|illustrator|indesign|after effects|premiere|ui design|ux design|ui/ux|ux/ui|user research|wireframing|prototyping|graphic design|typography|canva|invision|visual design)\b",
            ),
            rule(
                SkillCategory::EngineeringCad,
                r"\b(?:autocad|solidworks|catia|revit|ansys|cad|cam|fea|cfd|mechanical design|plc|labview|3d modeling|creo|fusion 360|inventor|simulink)\b",
            ),
            rule(
                SkillCategory::ProjectManagement,
                r"\b(?:project management|program management|product management|agile|scrum|kanban|jira|confluence|asana|trello|pmp|prince2|waterfall|stakeholder management|risk management|roadmapping|sprint planning|lean|six sigma)\b",
            ),
            rule(
                SkillCategory::CommunicationLanguages,
                r"\b(?:communication|public speaking|presentation|presentations|writing|technical writing|english|spanish|french|german|mandarin|chinese|japanese|portuguese|arabic|hindi|italian|korean|russian|bilingual|translation)\b",
            ),
            rule(
                SkillCategory::ToolsSoftware,
                r"\b(?:git|github|gitlab|bitbucket|excel|microsoft office|ms office|word|powerpoint|outlook|google workspace|slack|notion|postman|vs code|visual studio|intellij|eclipse|xcode|sharepoint|zapier)\b",
            ),
            rule(
                SkillCategory::SoftSkills,
                r"\b(?:leadership|teamwork|team player|problem solving|problem-solving|critical thinking|collaboration|mentoring|mentorship|time management|adaptability|creativity|attention to detail|negotiation|conflict resolution|decision making|emotional intelligence|interpersonal|self-motivated|work ethic|organizational)\b",
            ),
        ];

        Self { rules }
    }

    pub fn categorize(&self, name: &str) -> SkillCategory {
        let name = name.trim();
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(name))
            .map(|rule| rule.category)
            .unwrap_or(SkillCategory::ProfessionalSkills)
    }
}

/// Categorize a single skill name with the default rule table.
pub fn categorize_skill(name: &str) -> SkillCategory {
    static CATEGORIZER: OnceLock<SkillCategorizer> = OnceLock::new();
    CATEGORIZER.get_or_init(SkillCategorizer::new).categorize(name)
}

pub struct SkillsExtractor {
    segmenter: SectionSegmenter,
    categorizer: SkillCategorizer,
    scanner: KeywordScanner,
    label_regex: Regex,
    item_split_regex: Regex,
    bullet_regex: Regex,
}

impl Default for SkillsExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl SkillsExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            segmenter: SectionSegmenter::new(config.min_section_chars),
            categorizer: SkillCategorizer::new(),
            scanner: KeywordScanner::default(),
            label_regex: Regex::new(r"^([A-Za-z][A-Za-z &/+.-]{1,40}?)[ \t]*:[ \t]*(.+)$")
                .expect("Invalid skill label regex"),
            item_split_regex: Regex::new(r"[,;•|]| {2,}").expect("Invalid skill split regex"),
            bullet_regex: Regex::new(r"^[•*\-][ \t]*").expect("Invalid bullet regex"),
        }
    }

    /// Skills from the skills section, falling back to a keyword scan of the
    /// whole document and then to a fixed default set. Never empty.
    pub fn extract_skills(&self, text: &str) -> Vec<Skill> {
        if let Some(section) = self.segmenter.find(text, SectionKind::Skills) {
            let skills = self.parse_section(&section);
            if !skills.is_empty() {
                debug!("Parsed {} skills from skills section", skills.len());
                return skills;
            }
        }

        let scanned: Vec<Skill> = self
            .scanner
            .scan(text)
            .into_iter()
            .map(|name| Skill::new(name, self.categorizer.categorize(name)))
            .collect();
        if !scanned.is_empty() {
            debug!("Keyword scan found {} skills", scanned.len());
            return scanned;
        }

        debug!("No skills found, using defaults");
        DEFAULT_SKILLS
            .iter()
            .map(|name| Skill::new(*name, self.categorizer.categorize(name)))
            .collect()
    }

    fn parse_section(&self, section: &str) -> Vec<Skill> {
        let mut skills = Vec::new();
        let mut seen = HashSet::new();

        for line in section.lines() {
            let line = self.bullet_regex.replace(line.trim(), "");
            if line.is_empty() {
                continue;
            }

            let (explicit, items) = match self.label_regex.captures(&line) {
                Some(caps) => {
                    let category = SkillCategory::from_label(&caps[1]);
                    (category, caps[2].to_string())
                }
                None => (None, line.to_string()),
            };

            let items = items.replace(['(', ')', '[', ']'], ",");
            for token in self.item_split_regex.split(&items) {
                let token = self.clean_token(token);
                if !is_valid_token(&token) || !seen.insert(token.to_lowercase()) {
                    continue;
                }
                let category = explicit.unwrap_or_else(|| self.categorizer.categorize(&token));
                skills.push(Skill::new(token, category));
            }
        }

        skills
    }

    fn clean_token(&self, token: &str) -> String {
        let token = self.bullet_regex.replace(token.trim(), "");
        let mut token = token.trim();
        for prefix in ["and ", "or ", "And ", "Or "] {
            if let Some(rest) = token.strip_prefix(prefix) {
                token = rest.trim_start();
            }
        }
        token.trim_end_matches('.').trim().to_string()
    }
}

fn is_valid_token(token: &str) -> bool {
    let length = token.chars().count();
    if !(2..30).contains(&length) {
        return false;
    }
    if STOPWORDS.contains(&token.to_lowercase().as_str()) {
        return false;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    token.chars().any(char::is_alphabetic)
}
