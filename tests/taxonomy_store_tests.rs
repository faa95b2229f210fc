use munbank::{
    classify::Classification,
    taxonomy::{
        CognitiveDomain, TaxonomyError, TaxonomySnapshot, TypeCode, TypeFilter, TypeRecord,
    },
};

fn record(code: &str, level: &str, domain: &str, standard: &str) -> TypeRecord {
    TypeRecord {
        type_code: TypeCode::parse(code).expect("fixture code"),
        type_name: format!("유형 {code}"),
        description: "인수분해를 이용한 풀이".to_string(),
        solution_method: "공통인수 묶기".to_string(),
        subject: "수학".to_string(),
        area: domain.to_string(),
        standard_code: standard.to_string(),
        standard_content: format!("성취기준 {standard}"),
        cognitive: CognitiveDomain::Calculation,
        difficulty_min: 1,
        difficulty_max: 5,
        keywords: vec!["인수분해".to_string()],
        school_level: if level.starts_with('H') { "고등 공통" } else { "중등" }.to_string(),
        level_code: level.to_string(),
        domain_code: domain.to_string(),
        is_active: true,
    }
}

fn fixture_records() -> Vec<TypeRecord> {
    let mut records = vec![
        record("MA-H1-POLY-01-01", "H1", "POLY", "[10공수1-01]"),
        record("MA-H1-POLY-01-02", "H1", "POLY", "[10공수1-01]"),
        record("MA-H1-EQN-02-01", "H1", "EQN", "[10공수1-02]"),
        record("MA-M1-NUM-01-01", "M1", "NUM", "[9수1-01]"),
    ];
    records[2].cognitive = CognitiveDomain::Inference;
    records[2].type_name = "이차방정식의 활용".to_string();
    records[2].description = "근과 계수의 관계를 이용한 풀이".to_string();
    records[2].keywords = vec!["이차방정식".to_string(), "활용".to_string()];
    records
}

fn classification(problem: &str, code: &str) -> Classification {
    Classification {
        id: format!("cls-{problem}"),
        problem_id: problem.to_string(),
        type_code: code.to_string(),
        difficulty: 3,
        difficulty_scoring: None,
        cognitive_domain: CognitiveDomain::Calculation,
        confidence: 0.9,
        is_verified: false,
    }
}

#[test]
fn list_orders_by_type_code_and_paginates() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");

    let page = snapshot.list(&TypeFilter::default(), 2, 0).expect("list");
    assert_eq!(page.total_count, 4);
    let codes: Vec<&str> = page.rows.iter().map(|r| r.type_code.as_str()).collect();
    assert_eq!(codes, vec!["MA-H1-EQN-02-01", "MA-H1-POLY-01-01"]);

    let rest = snapshot.list(&TypeFilter::default(), 10, 2).expect("list");
    assert_eq!(rest.rows.len(), 2);
    assert_eq!(rest.total_count, 4);
}

#[test]
fn list_rejects_out_of_range_limits() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");

    assert!(matches!(
        snapshot.list(&TypeFilter::default(), 0, 0),
        Err(TaxonomyError::InvalidPagination { .. })
    ));
    assert!(matches!(
        snapshot.list(&TypeFilter::default(), 501, 0),
        Err(TaxonomyError::InvalidPagination { .. })
    ));
    assert!(snapshot.list(&TypeFilter::default(), 500, 0).is_ok());
}

#[test]
fn filters_are_conjunctive() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");

    let filter = TypeFilter::builder()
        .level("H1")
        .cognitive(CognitiveDomain::Inference)
        .build();
    let page = snapshot.list(&filter, 100, 0).expect("list");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.rows[0].type_code.as_str(), "MA-H1-EQN-02-01");
}

#[test]
fn search_matches_name_and_keywords_case_insensitively() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");

    let by_keyword = snapshot
        .list(&TypeFilter::builder().search("이차방정식").build(), 100, 0)
        .expect("list");
    assert_eq!(by_keyword.total_count, 1);

    let by_description = snapshot
        .list(&TypeFilter::builder().search("인수분해").build(), 100, 0)
        .expect("list");
    assert_eq!(by_description.total_count, 3);
}

#[test]
fn inactive_records_are_invisible_to_reads() {
    let mut records = fixture_records();
    records[0].is_active = false;
    let snapshot = TaxonomySnapshot::from_records(records).expect("snapshot");

    assert!(snapshot.get("MA-H1-POLY-01-01").is_none());
    let page = snapshot.list(&TypeFilter::default(), 100, 0).expect("list");
    assert_eq!(page.total_count, 3);
}

#[test]
fn detail_reports_related_types_and_references() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");
    let classifications = vec![
        classification("p1", "MA-H1-POLY-01-01"),
        classification("p2", "MA-H1-POLY-01-01"),
        classification("p3", "MA-H1-EQN-02-01"),
    ];

    let detail = snapshot
        .detail("MA-H1-POLY-01-01", &classifications)
        .expect("detail");
    assert_eq!(detail.record.type_code.as_str(), "MA-H1-POLY-01-01");
    assert_eq!(detail.references.len(), 2);
    assert_eq!(detail.related.len(), 1);
    assert_eq!(detail.related[0].type_code.as_str(), "MA-H1-POLY-01-02");
}

#[test]
fn detail_of_unknown_code_is_an_error_not_empty_success() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");
    assert!(matches!(
        snapshot.detail("MA-H1-POLY-09-09", &[]),
        Err(TaxonomyError::UnknownTypeCode(code)) if code == "MA-H1-POLY-09-09"
    ));
}

#[test]
fn stats_counts_each_grouping_independently() {
    let snapshot = TaxonomySnapshot::from_records(fixture_records()).expect("snapshot");
    let stats = snapshot.stats();

    assert_eq!(stats.total, 4);
    assert_eq!(stats.total_standards, 3);
    assert!(stats.by_level.contains(&("H1".to_string(), 3)));
    assert!(stats.by_level.contains(&("M1".to_string(), 1)));
    assert!(stats.by_domain.contains(&("POLY".to_string(), 2)));
    assert!(stats.by_cognitive.contains(&("CALCULATION".to_string(), 3)));
    assert!(stats.by_cognitive.contains(&("INFERENCE".to_string(), 1)));
    assert!(stats.by_school.contains(&("고등 공통".to_string(), 3)));
}

#[test]
fn duplicate_codes_in_an_import_are_rejected() {
    let mut records = fixture_records();
    records.push(record("MA-H1-POLY-01-01", "H1", "POLY", "[10공수1-01]"));

    assert!(matches!(
        TaxonomySnapshot::from_records(records),
        Err(TaxonomyError::DuplicateTypeCode(code)) if code == "MA-H1-POLY-01-01"
    ));
}

#[test]
fn invalid_difficulty_bands_are_rejected() {
    let mut records = fixture_records();
    records[0].difficulty_min = 0;
    assert!(matches!(
        TaxonomySnapshot::from_records(records),
        Err(TaxonomyError::InvalidDifficultyBand { .. })
    ));

    let mut records = fixture_records();
    records[1].difficulty_max = 6;
    assert!(matches!(
        TaxonomySnapshot::from_records(records),
        Err(TaxonomyError::InvalidDifficultyBand { .. })
    ));

    let mut records = fixture_records();
    records[2].difficulty_min = 4;
    records[2].difficulty_max = 2;
    assert!(matches!(
        TaxonomySnapshot::from_records(records),
        Err(TaxonomyError::InvalidDifficultyBand { .. })
    ));
}
