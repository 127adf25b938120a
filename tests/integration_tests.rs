//! Integration tests for the pattoo web helpers
//!
//! These tests drive the public API the way the dashboard does: resolve a
//! GraphQL response into an index, then render labels and chart links.

use serde_json::{json, Value};
use tempfile::TempDir;

use pattoo_web::{
    config::Config,
    graphql::QueryRequest,
    pair_xlate::{self, ResolveError, XlateResponse},
    uri,
};

// ==================== Test Helpers ====================

fn create_test_config(language: &str) -> Config {
    Config {
        language: language.to_string(),
        site_prefix: "/pattoo/web".to_string(),
        default_chart_seconds: 86400,
    }
}

fn entry(key: &str, translation: &str, units: &str, code: &str) -> Value {
    json!({"node": {
        "key": key,
        "translation": translation,
        "units": units,
        "language": {"code": code}
    }})
}

/// Bulk response with one empty group and two populated ones
fn all_groups_response() -> Value {
    json!({"data": {"allPairXlateGroup": {"edges": [
        {"node": {
            "id": "UGFpclhsYXRlR3JvdXA6MQ==",
            "idxPairXlateGroup": "1",
            "pairXlatePairXlateGroup": {"edges": []}}},
        {"node": {
            "id": "UGFpclhsYXRlR3JvdXA6Mg==",
            "idxPairXlateGroup": "2",
            "pairXlatePairXlateGroup": {"edges": [
                entry("pattoo_agent_snmpd_.1.3.6.1.2.1.31.1.1.1.9",
                      "Interface Broadcast Packets (HC inbound)", "Packets/s", "en"),
                entry("pattoo_agent_snmpd_.1.3.6.1.2.1.31.1.1.1.8",
                      "Interface Multicast Packets (HC inbound)", "Packets/s", "en"),
                entry("pattoo_agent_snmpd_.1.3.6.1.2.1.31.1.1.1.8",
                      "Paquets multicast d'interface", "Paquets/s", "fr"),
            ]}}},
        {"node": {
            "id": "UGFpclhsYXRlR3JvdXA6NA==",
            "idxPairXlateGroup": "4",
            "pairXlatePairXlateGroup": {"edges": [
                entry("pattoo_agent_modbustcpd_input_register_30486",
                      "Supply Air Temperature (F)", "Degrees (F)", "en"),
                entry("pattoo_agent_modbustcpd_input_register_30488",
                      "Return Air Temperature (F)", "Degrees (F)", "en"),
            ]}}},
    ]}}})
}

// ==================== Resolution Workflow Tests ====================

#[test]
fn test_bulk_response_builds_index_per_group() {
    let config = create_test_config("en");
    let index = pair_xlate::resolve(&all_groups_response(), config.language()).unwrap();

    let sizes: Vec<(&str, usize)> = index.iter().map(|(k, v)| (k.as_str(), v.len())).collect();
    assert_eq!(sizes, vec![("1", 0), ("2", 2), ("4", 2)]);
}

#[test]
fn test_language_filter_follows_config() {
    let index = pair_xlate::resolve(&all_groups_response(), create_test_config("fr").language())
        .unwrap();

    assert_eq!(index.len(), 3);
    assert!(index.get("4").unwrap().is_empty());
    assert_eq!(
        index.label("2", "pattoo_agent_snmpd_.1.3.6.1.2.1.31.1.1.1.8"),
        "Paquets multicast d'interface"
    );
}

#[test]
fn test_single_group_response_only_keeps_configured_language() {
    let response = json!({"data": {"pairXlateGroup": {
        "id": "UGFpclhsYXRlR3JvdXA6NQ==",
        "idxPairXlateGroup": "5",
        "pairXlatePairXlateGroup": {"edges": [
            entry("pattoo_agent_bacnetipd_analog_value_point_19",
                  "Output KVA (Main Panel)", "KVA", "en"),
            entry("pattoo_agent_bacnetipd_analog_value_point_78",
                  "Percentage Load (Main Panel)", "%", "4f2b8c1e"),
        ]}}}});

    let index = pair_xlate::resolve(&response, "en").unwrap();
    let keys: Vec<&String> = index.get("5").unwrap().keys().collect();
    assert_eq!(keys, vec!["pattoo_agent_bacnetipd_analog_value_point_19"]);
}

#[test]
fn test_groups_match_bulk_index() {
    let response = XlateResponse::from_value(&all_groups_response()).unwrap();

    let mut merged = pair_xlate::resolve(&Value::Null, "en").unwrap();
    for group in response.groups("en") {
        merged.merge(group.into_index());
    }
    assert_eq!(merged, response.translations("en"));
}

#[test]
fn test_resolve_is_pure() {
    let response = all_groups_response();
    let first = pair_xlate::resolve(&response, "en").unwrap();
    let second = pair_xlate::resolve(&response, "en").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_malformed_response_surfaces_error() {
    let response = json!({"data": {"allPairXlateGroup": {"edges": [
        {"node": {"idxPairXlateGroup": "1"}}
    ]}}});
    assert!(matches!(
        pair_xlate::resolve(&response, "en"),
        Err(ResolveError::Malformed(_))
    ));
}

// ==================== Rendering Tests ====================

#[test]
fn test_labels_and_links_render_together() {
    let config = create_test_config("en");
    let index = pair_xlate::resolve(&all_groups_response(), config.language()).unwrap();

    let key = "pattoo_agent_modbustcpd_input_register_30486";
    let label = index.label("4", key);
    let units = index.lookup("4", key).and_then(|r| r.units.as_deref());
    let secondsago = uri::integerize_arg(&json!("3600"));

    let link = uri::chart_link(&config, "RGF0YVBvaW50OjQ=", Some(&label), secondsago);
    assert_eq!(
        link,
        r#"<a href="/pattoo/web/chart/datapoint/RGF0YVBvaW50OjQ=?secondsago=3600">Supply Air Temperature (F)</a>"#
    );
    assert_eq!(units, Some("Degrees (F)"));
}

#[test]
fn test_flag_argument_falls_back_to_default_window() {
    let config = create_test_config("en");
    let secondsago = uri::integerize_arg(&json!(true));
    let link = uri::chart_link(&config, "1", None, secondsago);
    assert!(link.contains("secondsago=86400"));
}

// ==================== File Loading Tests ====================

#[test]
fn test_load_response_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("xlate.json");
    std::fs::write(&path, serde_json::to_string(&all_groups_response()).unwrap()).unwrap();

    let response = pair_xlate::load_response(&path).unwrap();
    let index = pair_xlate::resolve(&response, "en").unwrap();
    assert_eq!(index.len(), 3);
}

#[test]
fn test_load_response_reports_bad_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = pair_xlate::load_response(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse GraphQL response"));
}

#[test]
fn test_load_response_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = pair_xlate::load_response(&temp_dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read GraphQL response"));
}

// ==================== Query Tests ====================

#[test]
fn test_query_requests_serialize() {
    let bulk = serde_json::to_value(QueryRequest::all_pair_xlate_groups()).unwrap();
    let single =
        serde_json::to_value(QueryRequest::pair_xlate_group("UGFpclhsYXRlR3JvdXA6NQ==")).unwrap();

    assert!(bulk["query"].as_str().unwrap().contains("allPairXlateGroup"));
    assert_eq!(single["variables"], json!({"id": "UGFpclhsYXRlR3JvdXA6NQ=="}));
}
