use munbank::{
    classify::{PromptMode, prompt::PromptBuilder},
    taxonomy::{CognitiveDomain, TaxonomySnapshot, TypeCode, TypeRecord},
};

fn record(code: &str, level: &str, active: bool) -> TypeRecord {
    TypeRecord {
        type_code: TypeCode::parse(code).expect("fixture code"),
        type_name: format!("유형 {code}"),
        description: "이차방정식의 근 구하기".to_string(),
        solution_method: "근의 공식 적용".to_string(),
        subject: "수학".to_string(),
        area: "대수".to_string(),
        standard_code: "[10공수1-02]".to_string(),
        standard_content: "이차방정식을 풀 수 있다.".to_string(),
        cognitive: CognitiveDomain::Calculation,
        difficulty_min: 2,
        difficulty_max: 4,
        keywords: vec!["이차방정식".to_string()],
        school_level: "고등 공통".to_string(),
        level_code: level.to_string(),
        domain_code: "EQN".to_string(),
        is_active: active,
    }
}

fn fixture_snapshot() -> TaxonomySnapshot {
    TaxonomySnapshot::from_records(vec![
        record("MA-H1-EQN-02-01", "H1", true),
        record("MA-H1-EQN-02-02", "H1", true),
        record("MA-M1-EQN-02-01", "M1", true),
        record("MA-H1-EQN-02-09", "H1", false),
    ])
    .expect("snapshot")
}

#[test]
fn empty_snapshot_falls_back_to_code_grammar() {
    let snapshot = TaxonomySnapshot::from_records(vec![]).expect("snapshot");
    let prompt = PromptBuilder::builder().snapshot(&snapshot).build().render();

    assert_eq!(prompt.candidate_count, 0);
    assert!(!prompt.system.is_empty());
    assert!(prompt.system.contains("Candidate types (unavailable)"));
    assert!(prompt.system.contains("{PREFIX}-{LEVEL}-{DOMAIN}-{STANDARD_SEQ}-{SEQ}"));
}

#[test]
fn filter_with_no_matches_also_falls_back() {
    let snapshot = fixture_snapshot();
    let prompt = PromptBuilder::builder()
        .snapshot(&snapshot)
        .level_code("E56")
        .build()
        .render();

    assert_eq!(prompt.candidate_count, 0);
    assert!(prompt.system.contains("Candidate types (unavailable)"));
}

#[test]
fn output_is_deterministic_for_a_fixed_snapshot() {
    let snapshot = fixture_snapshot();
    let build = || {
        PromptBuilder::builder()
            .snapshot(&snapshot)
            .mode(PromptMode::Full)
            .build()
            .render()
    };
    assert_eq!(build(), build());
}

#[test]
fn light_mode_lists_candidates_without_the_rubric() {
    let snapshot = fixture_snapshot();
    let prompt = PromptBuilder::builder().snapshot(&snapshot).build().render();

    assert_eq!(prompt.candidate_count, 3);
    assert!(prompt.system.contains("MA-H1-EQN-02-01"));
    assert!(prompt.system.contains("2-4"));
    assert!(prompt.system.contains("expandedTypeCode"));
    assert!(!prompt.system.contains("difficultyScoring"));
    // Inactive rows never become candidates.
    assert!(!prompt.system.contains("MA-H1-EQN-02-09"));
}

#[test]
fn full_mode_demands_the_scoring_breakdown() {
    let snapshot = fixture_snapshot();
    let prompt = PromptBuilder::builder()
        .snapshot(&snapshot)
        .mode(PromptMode::Full)
        .build()
        .render();

    assert!(prompt.system.contains("# Difficulty rubric"));
    assert!(prompt.system.contains("difficultyScoring"));
    assert!(prompt.system.contains("conceptCount"));
}

#[test]
fn level_filter_restricts_the_candidate_table() {
    let snapshot = fixture_snapshot();
    let prompt = PromptBuilder::builder()
        .snapshot(&snapshot)
        .level_code("M1")
        .build()
        .render();

    assert_eq!(prompt.candidate_count, 1);
    assert!(prompt.system.contains("MA-M1-EQN-02-01"));
    assert!(!prompt.system.contains("MA-H1-EQN-02-01"));
}

#[test]
fn messages_pair_system_payload_with_problem_text() {
    let snapshot = fixture_snapshot();
    let prompt = PromptBuilder::builder().snapshot(&snapshot).build().render();

    let messages = prompt
        .messages("x^2 - 5x + 6 = 0 의 두 근의 합을 구하시오.")
        .expect("messages");
    assert_eq!(messages.len(), 2);
}
