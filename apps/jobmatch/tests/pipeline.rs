use std::sync::Arc;

use chrono::{TimeZone, Utc};
use jobmatch::jobs::{InMemoryCache, NoCache};
use jobmatch::{
    EducationLevel, JobPosting, MatchBand, MatchWeights, MatchingPipeline, PipelineSettings,
    SkillVocabulary,
};

const RESUME: &str = r#"
    Alex Rivera
    alex.rivera@example.com | +1 (555) 987-6543 | linkedin.com/in/alexrivera

    Summary
    Data engineer with 5 years of experience designing batch and streaming
    pipelines for analytics teams.

    Experience
    Northwind Analytics, Senior Data Engineer, 2020 - Present
    Built Python ETL jobs on AWS, modelled warehouses in SQL and PostgreSQL,
    scheduled workloads with Airflow and shipped services in Docker.
    Contoso, Data Engineer, 2018 - 2020
    Maintained Spark jobs and REST APIs, wrote dashboards in Tableau.

    Education
    Bachelor of Science in Computer Science

    Skills
    Python, SQL, PostgreSQL, AWS, Docker, Spark, Airflow, Git, Tableau
"#;

fn pipeline() -> MatchingPipeline {
    let vocab = Arc::new(SkillVocabulary::builtin().unwrap());
    MatchingPipeline::new(vocab, PipelineSettings::default(), Arc::new(InMemoryCache::new()))
        .unwrap()
}

fn postings() -> Vec<JobPosting> {
    vec![
        JobPosting::new(
            "job-1",
            "Senior Data Engineer",
            "Python, SQL and AWS. 3+ years of experience. Bachelor's degree required.",
        ),
        JobPosting::new(
            "job-2",
            "Platform Engineer",
            "Kubernetes, Terraform and Go lang. 8+ years of experience. Master's degree.",
        ),
        JobPosting::new("job-3", "Broken upload", "\0\0\0%PDF-1.7 binary"),
        JobPosting::new("job-4", "Analyst", "SQL and Tableau dashboards for the finance team."),
        JobPosting::new(
            "job-5",
            "ML Engineer",
            "Python, machine learning, Docker. PhD preferred. 5 years of experience.",
        ),
    ]
}

#[test]
fn test_unparseable_posting_is_isolated() {
    let p = pipeline();
    let report = p.match_resume("resume.txt", RESUME, &postings());

    assert_eq!(report.batch.results.len(), 4);
    assert_eq!(report.batch.failures.len(), 1);
    assert_eq!(report.batch.failures[0].posting_id, "job-3");
    assert!(report
        .batch
        .results
        .iter()
        .all(|r| r.posting_id != "job-3"));
}

#[test]
fn test_results_sorted_descending() {
    let p = pipeline();
    let report = p.match_resume("resume.txt", RESUME, &postings());
    let scores: Vec<f64> = report
        .batch
        .results
        .iter()
        .map(|r| r.composite_score)
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    for r in &report.batch.results {
        assert!((0.0..=100.0).contains(&r.composite_score));
        assert_eq!(r.band, MatchBand::from_score(r.composite_score));
    }
}

#[test]
fn test_profile_fields_from_resume() {
    let profile = pipeline().build_profile("resume.txt", RESUME);
    for skill in ["python", "sql", "postgresql", "aws", "docker", "spark", "git"] {
        assert!(profile.has_skill(skill), "missing {skill}");
    }
    assert_eq!(profile.education, Some(EducationLevel::Bachelor));
    assert_eq!(profile.years_experience, Some(5));
    assert!(profile.contact.has_direct_contact());
}

#[test]
fn test_full_match_is_fully_explained() {
    let p = pipeline();
    let report = p.match_resume("resume.txt", RESUME, &postings());
    let best = report
        .batch
        .results
        .iter()
        .find(|r| r.posting_id == "job-1")
        .unwrap();

    assert_eq!(best.sub_scores.skills, 100.0);
    assert_eq!(best.sub_scores.experience, 100.0);
    assert_eq!(best.sub_scores.education, 100.0);
    assert!(best.missing_skills.is_empty());
    assert_eq!(best.explanation.len(), 4);
    assert!(best.explanation[0].starts_with("Skills: 100% - 3 of 3"));
    assert!(best.explanation[1].starts_with("Experience: 100%"));
    assert!(best.explanation[2].starts_with("Education: 100%"));
    assert!(best.explanation[3].starts_with("Text similarity:"));
}

#[test]
fn test_shortfalls_are_scored_and_explained() {
    let p = pipeline();
    let report = p.match_resume("resume.txt", RESUME, &postings());
    let platform = report
        .batch
        .results
        .iter()
        .find(|r| r.posting_id == "job-2")
        .unwrap();

    assert_eq!(platform.sub_scores.skills, 0.0);
    assert!((platform.sub_scores.experience - 62.5).abs() < 1e-9);
    assert_eq!(platform.sub_scores.education, 60.0);
    assert_eq!(platform.band, MatchBand::Poor);
    assert!(platform
        .explanation
        .last()
        .unwrap()
        .starts_with("Missing skills: "));
    assert!(!platform.recommendations.is_empty());
}

#[test]
fn test_equal_scores_ordered_by_id() {
    let p = pipeline();
    let profile = p.build_profile("r", RESUME);
    let text = "Python and SQL";
    let postings = vec![
        JobPosting::new("zeta", "Engineer", text),
        JobPosting::new("alpha", "Engineer", text),
        JobPosting::new("mid", "Engineer", text),
    ];
    let batch = p.rank(&profile, &postings);
    let ids: Vec<_> = batch.results.iter().map(|r| r.posting_id.as_str()).collect();
    assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_equal_scores_prefer_recent_postings() {
    let p = pipeline();
    let profile = p.build_profile("r", RESUME);
    let text = "Python and SQL";
    let postings = vec![
        JobPosting::new("a-undated", "Engineer", text),
        JobPosting::new("b-old", "Engineer", text)
            .with_posted_at(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
        JobPosting::new("c-new", "Engineer", text)
            .with_posted_at(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
    ];
    let batch = p.rank(&profile, &postings);
    let ids: Vec<_> = batch.results.iter().map(|r| r.posting_id.as_str()).collect();
    assert_eq!(ids, vec!["c-new", "b-old", "a-undated"]);
}

#[test]
fn test_repeated_ranking_uses_cache_and_is_stable() {
    let p = pipeline();
    let profile = p.build_profile("r", RESUME);
    let postings = postings();

    let first = p.rank(&profile, &postings);
    let after_first = p.cache().stats();
    let second = p.rank(&profile, &postings);
    let after_second = p.cache().stats();

    assert_eq!(first, second);
    assert_eq!(p.cache().len(), 4);
    assert_eq!(after_second.hits - after_first.hits, 4);
}

#[test]
fn test_edited_posting_is_rescored() {
    let p = pipeline();
    let profile = p.build_profile("r", RESUME);

    let original = vec![JobPosting::new("job", "Engineer", "Kubernetes and Terraform")];
    let before = p.rank(&profile, &original);
    assert_eq!(before.results[0].sub_scores.skills, 0.0);

    let edited = vec![JobPosting::new("job", "Engineer", "Python and SQL")];
    let after = p.rank(&profile, &edited);
    assert_eq!(after.results[0].sub_scores.skills, 100.0);
    assert_eq!(p.cache().len(), 1);

    assert!(p.cache().invalidate("job"));
    assert!(p.cache().is_empty());
}

#[test]
fn test_weight_override_changes_composite() {
    let vocab = Arc::new(SkillVocabulary::builtin().unwrap());
    let settings = PipelineSettings {
        weights: MatchWeights::new(1.0, 0.0, 0.0, 0.0).unwrap(),
        ..PipelineSettings::default()
    };
    let p = MatchingPipeline::new(vocab, settings, Arc::new(NoCache::default())).unwrap();
    let profile = p.build_profile("r", "Python developer");
    let postings = vec![JobPosting::new("job", "Engineer", "Python, SQL, Docker and AWS")];
    let batch = p.rank(&profile, &postings);
    assert!((batch.results[0].composite_score - 25.0).abs() < 1e-9);
}

#[test]
fn test_empty_resume_still_ranks() {
    let p = pipeline();
    let report = p.match_resume("blank.pdf", "   ", &postings());
    assert_eq!(report.profile.quality_score, 0);
    assert!(report.profile.skills.is_empty());
    assert_eq!(report.batch.results.len(), 4);
    let analyst = report
        .batch
        .results
        .iter()
        .find(|r| r.posting_id == "job-4")
        .unwrap();
    assert_eq!(analyst.sub_scores.skills, 0.0);
    assert_eq!(analyst.sub_scores.text_similarity, 0.0);
}

#[test]
fn test_empty_vocabulary_is_rejected() {
    let empty: Vec<(&str, Vec<&str>)> = vec![];
    assert!(SkillVocabulary::from_map(empty).is_err());
}

#[test]
fn test_prose_initials_do_not_inflate_education() {
    let p = pipeline();
    let profile = p.build_profile(
        "r",
        "I'm a self-taught Python developer. High school diploma.",
    );
    assert_eq!(profile.education, Some(EducationLevel::HighSchool));

    let postings = vec![JobPosting::new(
        "job",
        "Engineer",
        "Python services. Master's degree required.",
    )];
    let batch = p.rank(&profile, &postings);
    assert_eq!(batch.results[0].sub_scores.education, 0.0);
}
