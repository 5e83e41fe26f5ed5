//! Table-driven cases for pattern cleaning, covering the messy inputs real
//! clients send.

use fitsched_core::pattern::{parse_patterns, WeekdayPattern};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(vec![1, 3, 5], Some("1-3-5"))]
#[case(vec![5, 1, 3, 1], Some("1-3-5"))]
#[case(vec![0, 0, 0], Some("0"))]
#[case(vec![6, 0], Some("0-6"))]
#[case(vec![-1, 7, 12], None)]
#[case(vec![], None)]
#[case(vec![2, -5, 2, 9], Some("2"))]
fn normalize_cases(#[case] input: Vec<i64>, #[case] expected_key: Option<&str>) {
    let result = WeekdayPattern::normalize(input);
    match expected_key {
        Some(key) => assert_eq!(result.unwrap().key(), key),
        None => assert!(result.is_none()),
    }
}

#[rstest]
#[case(json!([1, 3, 5]), vec!["1-3-5"])]
#[case(json!([[1, 3, 5], [2, 4, 6]]), vec!["1-3-5", "2-4-6"])]
#[case(json!([[1, 3], [], [77]]), vec!["1-3"])]
#[case(json!([["1", "3", "junk"]]), vec!["1-3"])]
#[case(json!({}), vec![])]
#[case(json!(null), vec![])]
fn parse_patterns_cases(#[case] input: serde_json::Value, #[case] expected: Vec<&str>) {
    let keys: Vec<String> = parse_patterns(&input).iter().map(|p| p.key()).collect();
    assert_eq!(keys, expected);
}

#[rstest]
fn monday_first_iteration_order() {
    let pattern = WeekdayPattern::normalize([0, 3, 6, 1]).unwrap();
    assert_eq!(pattern.days(), &[1, 3, 6, 0]);
    assert_eq!(pattern.key(), "0-1-3-6");
}
