//! Tests for query analysis

use super::*;

const FULL_SCAN_PLAN: &str = "\
| id | select_type | table | type | possible_keys | key | key_len | ref | rows | Extra |
| 1 | SIMPLE | employees | ALL | NULL | NULL | NULL | NULL | 299113 | Using where; Using filesort |";

const INDEXED_PLAN: &str = "id\tselect_type\ttable\ttype\tpossible_keys\tkey\tkey_len\tref\trows\tExtra
1\tSIMPLE\temployees\tconst\tPRIMARY\tPRIMARY\t4\tconst\t1\t";

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.slow_query_secs, 1.0);
        assert_eq!(config.very_slow_query_secs, 5.0);
        assert_eq!(config.latency_policy, LatencyPolicy::FirstMatch);
        assert_eq!(config.max_suggestions, 3);
    }

    #[test]
    fn test_builder_methods_clamp() {
        let config = AnalyzerConfig::new()
            .with_slow_query_secs(-1.0)
            .with_very_slow_query_secs(8.0)
            .with_max_suggestions(0)
            .with_latency_policy(LatencyPolicy::Tiered);

        assert_eq!(config.slow_query_secs, 0.0);
        assert_eq!(config.very_slow_query_secs, 8.0);
        assert_eq!(config.max_suggestions, 1);
        assert_eq!(config.latency_policy, LatencyPolicy::Tiered);

        assert_eq!(AnalyzerConfig::new().with_max_suggestions(10).max_suggestions, 3);
    }

    #[test]
    fn test_partial_json() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"latency_policy": "tiered", "slow_query_secs": 0.5}"#).unwrap();
        assert_eq!(config.latency_policy, LatencyPolicy::Tiered);
        assert_eq!(config.slow_query_secs, 0.5);
        assert_eq!(config.max_suggestions, 3);
    }
}

mod analyze_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::suggestions::FILESORT_ADVICE;

    #[test]
    fn test_full_scan_query() {
        let record = analyze(
            1,
            "SELECT * FROM employees WHERE dept_id = 5 AND hire_date > '2020-01-01' ORDER BY last_name",
            FULL_SCAN_PLAN,
            0.42,
        );

        assert_eq!(record.id(), 1);
        assert_eq!(record.exec_time_secs(), 0.42);
        assert_eq!(record.tables(), &BTreeSet::from(["employees".to_string()]));
        assert_eq!(
            record.filter_columns(),
            &BTreeSet::from(["dept_id".to_string(), "hire_date".to_string()])
        );
        assert_eq!(
            record.issues(),
            &BTreeSet::from([
                Issue::FullScan,
                Issue::Filesort,
                Issue::NoIndexOnTable("employees".into()),
            ])
        );
        // 5 - 2 (full scan) - 1 (filesort)
        assert_eq!(record.rating().value(), 2);
        assert_eq!(
            record.suggestions(),
            &["Consider indexing: dept_id, hire_date".to_string(), FILESORT_ADVICE.to_string()]
        );
        assert_eq!(
            record.index_ddl(),
            vec![
                "CREATE INDEX idx_employees_dept_id ON employees(dept_id);",
                "CREATE INDEX idx_employees_hire_date ON employees(hire_date);",
            ]
        );
        assert!(!record.plan_unavailable());
    }

    #[test]
    fn test_indexed_query() {
        let record = analyze(2, "SELECT * FROM employees WHERE emp_no = 10001", INDEXED_PLAN, 0.01);

        assert!(record.issues().is_empty());
        assert_eq!(record.rating(), Rating::BEST);
        assert_eq!(record.suggestions(), &["Query seems well-optimized.".to_string()]);
        assert!(record.index_suggestions().is_empty());
    }

    #[test]
    fn test_empty_plan_rates_worst() {
        let record = analyze(3, "SELECT * FROM missing WHERE a = 1", "", 0.0);

        assert!(record.plan_unavailable());
        assert_eq!(record.rating(), Rating::WORST);
        assert_eq!(record.issue_labels(), vec!["Could not analyze."]);
        assert_eq!(
            record.suggestions(),
            &["Ensure the query is valid and the database is accessible.".to_string()]
        );
        assert!(record.tables().is_empty());
        assert!(record.index_suggestions().is_empty());
    }

    #[test]
    fn test_negative_and_nan_durations_become_zero() {
        assert_eq!(analyze(1, "SELECT 1", INDEXED_PLAN, -2.0).exec_time_secs(), 0.0);
        assert_eq!(analyze(1, "SELECT 1", INDEXED_PLAN, f64::NAN).exec_time_secs(), 0.0);
    }

    #[test]
    fn test_infinite_duration_is_rated_slow() {
        let record = analyze(1, "SELECT 1", INDEXED_PLAN, f64::INFINITY);

        assert_eq!(record.exec_time_secs(), f64::MAX);
        assert_eq!(record.rating().value(), 4);
        assert_eq!(
            record.suggestions(),
            &["Query is slow, consider partitioning or pre-aggregating data.".to_string()]
        );
        assert!(serde_json::to_string(&record).is_ok());
    }

    #[test]
    fn test_suggestion_limit_from_json_is_bounded() {
        let none: AnalyzerConfig = serde_json::from_str(r#"{"max_suggestions": 0}"#).unwrap();
        let record = QueryAnalyzer::with_config(none).analyze(1, "SELECT 1", INDEXED_PLAN, 0.0);
        assert_eq!(record.suggestions(), &["Query seems well-optimized.".to_string()]);

        let many: AnalyzerConfig = serde_json::from_str(r#"{"max_suggestions": 10}"#).unwrap();
        let record = QueryAnalyzer::with_config(many).analyze(
            1,
            "SELECT * FROM employees WHERE dept_id = 5",
            "id\ttable\ttype\tkey\tExtra\n1\temployees\tALL\tNULL\tUsing temporary; Using filesort",
            2.0,
        );
        assert_eq!(record.suggestions().len(), 3);
        assert_eq!(record.suggestions()[0], "Consider indexing: dept_id");
    }

    #[test]
    fn test_idempotent() {
        let query = "SELECT * FROM employees WHERE dept_id = 5";
        let first = analyze(7, query, FULL_SCAN_PLAN, 1.7);
        let second = analyze(7, query, FULL_SCAN_PLAN, 1.7);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_rating_always_in_range() {
        let plans = ["", FULL_SCAN_PLAN, INDEXED_PLAN, "garbage", "ALL Using temporary Using filesort"];
        for plan in plans {
            for secs in [0.0, 0.5, 1.5, 6.0, 100.0] {
                let value = analyze(1, "SELECT * FROM t WHERE a = 1", plan, secs).rating().value();
                assert!((1..=5).contains(&value), "rating {} out of range", value);
            }
        }
    }

    #[test]
    fn test_tiered_config() {
        let analyzer = QueryAnalyzer::with_config(
            AnalyzerConfig::default().with_latency_policy(LatencyPolicy::Tiered),
        );
        let record = analyzer.analyze(1, "SELECT 1", INDEXED_PLAN, 6.0);
        assert_eq!(record.rating().value(), 3);
    }
}

mod extractor_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedColumns;

    impl FilterColumnExtractor for FixedColumns {
        fn extract(&self, _query: &str) -> BTreeSet<String> {
            BTreeSet::from(["region".to_string()])
        }
    }

    #[test]
    fn test_custom_extractor_feeds_index_suggestions() {
        let analyzer = QueryAnalyzer::new().with_extractor(FixedColumns);
        let record = analyzer.analyze(1, "SELECT * FROM employees", FULL_SCAN_PLAN, 0.1);

        assert_eq!(
            record.index_ddl(),
            vec!["CREATE INDEX idx_employees_region ON employees(region);"]
        );
    }
}

mod batch_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sqlrate_core::QueryObservation;

    #[test]
    fn test_batch_preserves_input_order() {
        let inputs: Vec<_> = (1..=20)
            .map(|id| {
                let plan = if id % 2 == 0 { FULL_SCAN_PLAN } else { INDEXED_PLAN };
                AnalysisInput::new(id, format!("SELECT * FROM employees WHERE id = {}", id), plan, 0.1)
            })
            .collect();

        let records = QueryAnalyzer::new().analyze_batch(&inputs);

        let ids: Vec<_> = records.iter().map(AnalysisRecord::id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        for (input, record) in inputs.iter().zip(&records) {
            assert_eq!(record, &QueryAnalyzer::new().analyze_input(input));
        }
    }

    #[test]
    fn test_input_from_observation() {
        let observation = QueryObservation {
            query: "SELECT 1".to_string(),
            elapsed_secs: 0.3,
            plan: INDEXED_PLAN.to_string(),
            exec_stderr: String::new(),
        };

        let input = AnalysisInput::from_observation(4, observation);
        assert_eq!(input, AnalysisInput::new(4, "SELECT 1", INDEXED_PLAN, 0.3));
    }
}
