//! Integration tests for the resume portfolio generator

use resume_portfolio::config::OutputFormat;
use resume_portfolio::input::manager::InputManager;
use resume_portfolio::output::formatter::{save_output_to_file, suggest_filename, ProfileRenderer};
use resume_portfolio::processing::profile::{Skill, SkillCategory};
use resume_portfolio::ResumeParser;
use std::path::Path;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Maria Gonzalez"));
    assert!(text.contains("Senior Full Stack Developer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let result = manager.extract_text(path).await;
    assert!(result.is_ok());

    let text = result.unwrap();
    assert!(text.contains("Maria Gonzalez"));
    assert!(text.contains("Senior Full Stack Developer"));
    assert!(text.contains("• Frontend: React"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = manager.extract_text(path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_full_profile_from_text_resume() {
    let mut manager = InputManager::new();
    let document = manager
        .read_document(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    let profile = ResumeParser::new().parse_document(&document.text, &document.source_name);

    assert_eq!(profile.name, "Maria Gonzalez");
    assert_eq!(profile.title, "Senior Full Stack Developer");
    assert_eq!(profile.email, "maria.gonzalez@example.com");
    assert_eq!(profile.phone.as_deref(), Some("(415) 555-0132"));
    assert_eq!(profile.links.github.as_deref(), Some("https://github.com/mgonzalez"));
    assert_eq!(
        profile.links.linkedin.as_deref(),
        Some("https://linkedin.com/in/maria-gonzalez")
    );
    assert!(profile.summary.starts_with("Full stack developer with six years"));

    // Labeled lines keep their explicit category
    assert!(profile.skills.contains(&Skill::new("React", SkillCategory::Frontend)));
    assert!(profile
        .skills
        .contains(&Skill::new("Python", SkillCategory::ProgrammingLanguages)));
    assert!(profile.skills.contains(&Skill::new("Docker", SkillCategory::CloudDevOps)));
    assert!(profile
        .skills
        .contains(&Skill::new("Communication", SkillCategory::SoftSkills)));

    assert_eq!(profile.experience.len(), 2);
    let latest = &profile.experience[0];
    assert_eq!(latest.title, "Senior Software Engineer");
    assert_eq!(latest.company, "Ledgerly");
    assert_eq!(latest.duration, "Mar 2021 - Present");
    assert_eq!(latest.location, "San Francisco, CA");
    assert_eq!(latest.achievements.len(), 2);
    assert_eq!(profile.experience[1].company, "RouteWise");
    assert_eq!(profile.experience[1].location, "Remote");

    assert_eq!(profile.projects.len(), 2);
    assert_eq!(profile.projects[0].title, "Expense Splitter App");
    assert_eq!(
        profile.projects[0].technologies,
        vec!["React Native", "Firebase", "TypeScript"]
    );
    assert_eq!(
        profile.projects[0].link.as_deref(),
        Some("https://github.com/mgonzalez/expense-splitter")
    );
    assert_eq!(profile.projects[1].title, "Transit Delay Bot");
    assert_eq!(profile.projects[1].technologies, vec!["Python", "FastAPI", "AWS"]);

    assert_eq!(profile.education.len(), 1);
    assert_eq!(profile.education[0].school, "University of California");
    assert_eq!(profile.education[0].year.as_deref(), Some("2018"));
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree() {
    let mut manager = InputManager::new();
    let parser = ResumeParser::new();

    let txt = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let md = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    let from_txt = parser.parse(&txt);
    let from_md = parser.parse(&md);

    assert_eq!(from_md.name, from_txt.name);
    assert_eq!(from_md.title, from_txt.title);
    assert_eq!(from_md.email, from_txt.email);
    assert_eq!(from_md.summary, from_txt.summary);
    assert_eq!(from_md.experience[0].company, "Ledgerly");
    assert_eq!(from_md.experience[0].achievements, from_txt.experience[0].achievements);
    assert!(from_md.skills.contains(&Skill::new("Redux", SkillCategory::Frontend)));
}

#[tokio::test]
async fn test_render_and_save_every_format() {
    let mut manager = InputManager::new();
    let document = manager
        .read_document(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let profile = ResumeParser::new().parse(&document.text);

    let renderer = ProfileRenderer::with_options(false, true, true);
    let dir = tempfile::tempdir().unwrap();

    for format in [
        OutputFormat::Console,
        OutputFormat::Json,
        OutputFormat::Markdown,
        OutputFormat::Html,
    ] {
        let rendered = renderer.render(&profile, format).unwrap();
        assert!(rendered.contains("Maria Gonzalez"));

        let path = dir.path().join(suggest_filename(format, &document.source_name));
        save_output_to_file(&rendered, &path).unwrap();
        assert!(path.exists());
    }

    assert!(dir.path().join("sample_resume_portfolio.html").exists());
}
