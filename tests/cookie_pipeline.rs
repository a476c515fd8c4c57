//! End-to-end cookie pipeline: decode -> normalize -> validate.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use ivas_sms_analyzer::cookies::{decode, normalize, validate};
use ivas_sms_analyzer::ops;
use ivas_sms_analyzer::AnalyzerError;

#[test]
fn test_direct_header_blob_resolves_required_set() {
    let raw = decode("cf_clearance=abc; XSRF-TOKEN=def%3D%3D; ivas_sms_session=ghi; _ga=GA1.1");
    assert_eq!(raw.get("XSRF-TOKEN").map(String::as_str), Some("def=="));

    let set = normalize(&raw);
    assert_eq!(set.get("cf_clearance"), Some("abc"));
    assert_eq!(set.len(), 4);
    assert!(validate(&set).valid);
}

#[test]
fn test_base64_json_array_resolves_required_set() {
    let json = r#"[
        {"name": "cf-clearance", "value": "abc"},
        {"name": "csrf_token", "value": "def"},
        {"name": "laravel_session", "value": "ghi"}
    ]"#;
    let blob = STANDARD.encode(json);

    let set = normalize(&decode(&blob));
    // Aliases land on canonical names
    assert_eq!(set.get("cf_clearance"), Some("abc"));
    assert_eq!(set.get("XSRF-TOKEN"), Some("def"));
    assert_eq!(set.get("ivas_sms_session"), Some("ghi"));
    assert!(validate(&set).valid);
}

#[test]
fn test_base64_flat_map_resolves() {
    let blob = STANDARD.encode(r#"{"cf_clearance": "abc", "session": "ghi"}"#);
    let set = normalize(&decode(&blob));
    assert_eq!(set.get("cf_clearance"), Some("abc"));
    assert_eq!(set.get("ivas_sms_session"), Some("ghi"));
}

#[test]
fn test_garbage_input_yields_empty_map() {
    assert!(decode("no delimiters here").is_empty());
    assert!(decode("!!!not base64!!!").is_empty());
}

#[test]
fn test_validation_reports_what_is_missing() {
    let set = normalize(&decode("cf_clearance=abc; _gid=1"));
    let validation = validate(&set);
    assert!(!validation.valid);
    assert_eq!(validation.missing, vec!["XSRF-TOKEN", "ivas_sms_session"]);
}

#[test]
fn test_parse_cookies_operation_rejects_empty_input() {
    assert!(matches!(
        ops::parse_cookies(""),
        Err(AnalyzerError::EmptyCookieInput)
    ));
    assert!(matches!(
        ops::parse_cookies("  \n  "),
        Err(AnalyzerError::EmptyCookieInput)
    ));
}

#[test]
fn test_parse_cookies_operation_reports_canonical_names() {
    let summary =
        ops::parse_cookies("cf_clearance=a; XSRF-TOKEN=b; ivas_sms_session=c; _fbp=fb.1")
            .expect("valid cookie set");
    assert_eq!(summary.cookie_count, 4);
    assert!(summary.cookies.contains_key("_fbp"));
}

#[test]
fn test_unknown_cookie_names_survive_decode_but_not_normalize() {
    let raw = decode("cf_clearance=a; XSRF-TOKEN=b; ivas_sms_session=c; theme=dark");
    assert_eq!(raw.get("theme").map(String::as_str), Some("dark"));

    let set = normalize(&raw);
    assert_eq!(set.get("theme"), None);
    assert_eq!(set.len(), 3);
}
