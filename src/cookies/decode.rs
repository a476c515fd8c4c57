//! Cookie blob decoding.
//!
//! Cookie exports arrive from several browser extensions with incompatible
//! conventions: raw `k=v;` header strings, JSON arrays of cookie objects,
//! flat JSON maps, base64 wrappings of all of those, and a quoted
//! semicolon-separated format that some exporters truncate mid-object.
//! The caller never declares a format; decoding tries an ordered list of
//! strategies and the first one that yields any entries wins.
//!
//! Decoding never hard-fails. An unparseable input produces an empty map and
//! the caller decides how to report that.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::debug;
use serde_json::Value;

use super::CookieMap;
use crate::config::DIRECT_PARSE_MIN_LEN;

/// Ordered decoding strategies. Each returns `None` when it yields zero
/// entries so the chain falls through to the next one.
const STRATEGIES: &[fn(&str) -> Option<CookieMap>] = &[parse_direct, parse_base64_envelope];

/// Decodes an opaque cookie blob into a raw name→value map.
///
/// Tries each strategy in order and returns the first non-empty result; an
/// input no strategy understands yields an empty map, never an error.
pub fn decode(raw: &str) -> CookieMap {
    for strategy in STRATEGIES {
        if let Some(cookies) = strategy(raw) {
            debug!("decoded {} cookie(s)", cookies.len());
            return cookies;
        }
    }
    debug!("no decoding strategy matched the cookie input");
    CookieMap::new()
}

/// Direct `name=value; name=value` parse, with URL-decoded values.
///
/// Guarded so that short `=`-bearing strings without a `;` separator (which
/// are more likely base64 payloads containing padding) fall through to the
/// base64 strategy.
fn parse_direct(raw: &str) -> Option<CookieMap> {
    if !raw.contains('=') || !(raw.contains(';') || raw.len() > DIRECT_PARSE_MIN_LEN) {
        return None;
    }
    non_empty(split_pairs(raw, true))
}

/// Base64 envelope: decode, then try the inner formats in order.
fn parse_base64_envelope(raw: &str) -> Option<CookieMap> {
    let bytes = STANDARD.decode(raw.trim()).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    debug!("base64 envelope decoded to {} chars", decoded.len());

    for strategy in [parse_json_form, parse_quoted_form, parse_plain_pairs] {
        if let Some(cookies) = strategy(&decoded) {
            return Some(cookies);
        }
    }
    None
}

/// JSON form: an array of `{name, value}` objects, a single such object, or
/// a flat name→value map (string values only).
fn parse_json_form(text: &str) -> Option<CookieMap> {
    if !text.starts_with('[') && !text.starts_with('{') {
        return None;
    }
    let parsed: Value = serde_json::from_str(text).ok()?;

    let mut cookies = CookieMap::new();
    match parsed {
        Value::Array(items) => {
            for item in items {
                if let Some((name, value)) = name_value_pair(&item) {
                    cookies.insert(name, value);
                }
            }
        }
        Value::Object(ref map) => {
            if let Some((name, value)) = name_value_pair(&parsed) {
                cookies.insert(name, value);
            } else {
                for (key, value) in map {
                    if let Value::String(s) = value {
                        cookies.insert(key.clone(), s.clone());
                    }
                }
            }
        }
        _ => {}
    }
    non_empty(cookies)
}

/// Netscape-like quoted form: JSON cookie objects joined by `;`, e.g.
/// `{"domain":"...","name":"a","value":"b"};{"name":"c",...}`.
///
/// Some exporters truncate the trailing `}` of each object when joining, so
/// segments are repaired with a closing brace before parsing. Segments that
/// still fail to parse are skipped.
fn parse_quoted_form(text: &str) -> Option<CookieMap> {
    if !text.contains("\";\"") || !text.contains("\"name\"") {
        return None;
    }

    let mut cookies = CookieMap::new();
    for segment in text.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let repaired = if segment.ends_with('}') {
            segment.to_string()
        } else {
            format!("{segment}}}")
        };
        match serde_json::from_str::<Value>(&repaired) {
            Ok(obj) => {
                if let Some((name, value)) = name_value_pair(&obj) {
                    cookies.insert(name, value);
                }
            }
            Err(e) => {
                debug!("skipping unparseable cookie segment: {e}");
            }
        }
    }
    non_empty(cookies)
}

/// Raw `name=value; ...` pairs inside a decoded envelope, without
/// URL-decoding the values.
fn parse_plain_pairs(text: &str) -> Option<CookieMap> {
    if !text.contains('=') {
        return None;
    }
    non_empty(split_pairs(text, false))
}

/// Splits `name=value; name=value` text into a map.
///
/// Each segment is split on the *first* `=` only; cookie values routinely
/// contain `=` themselves (base64 padding, signed session payloads).
fn split_pairs(text: &str, url_decode: bool) -> CookieMap {
    let mut cookies = CookieMap::new();
    for segment in text.split(';') {
        let segment = segment.trim();
        let Some((name, value)) = segment.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let value = if url_decode {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        } else {
            value.to_string()
        };
        cookies.insert(name.to_string(), value);
    }
    cookies
}

fn name_value_pair(value: &Value) -> Option<(String, String)> {
    let name = value.get("name")?.as_str()?;
    let val = value.get("value")?.as_str()?;
    Some((name.to_string(), val.to_string()))
}

fn non_empty(cookies: CookieMap) -> Option<CookieMap> {
    if cookies.is_empty() {
        None
    } else {
        Some(cookies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64(s: &str) -> String {
        STANDARD.encode(s)
    }

    #[test]
    fn test_direct_delimited_parse() {
        let cookies = decode("name1=value1; name2=value2");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["name1"], "value1");
        assert_eq!(cookies["name2"], "value2");
    }

    #[test]
    fn test_direct_parse_url_decodes_values() {
        let cookies = decode("session=abc%3D%3D; other=1");
        assert_eq!(cookies["session"], "abc==");
    }

    #[test]
    fn test_direct_parse_splits_on_first_equals_only() {
        let cookies = decode("token=a=b=c; x=1");
        assert_eq!(cookies["token"], "a=b=c");
    }

    #[test]
    fn test_direct_parse_skips_empty_names() {
        let cookies = decode("=orphan; real=value");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["real"], "value");
    }

    #[test]
    fn test_long_single_pair_without_semicolon() {
        // No ';' but over the length threshold, so the direct parse applies
        let long_value = "v".repeat(60);
        let input = format!("cf_clearance={long_value}");
        let cookies = decode(&input);
        assert_eq!(cookies["cf_clearance"], long_value);
    }

    #[test]
    fn test_short_pair_without_semicolon_is_not_direct_parsed() {
        // Short, no ';': falls through to base64, which also fails
        assert!(decode("a=b").is_empty());
    }

    #[test]
    fn test_base64_json_array() {
        let json = r#"[{"name":"a","value":"b"}, {"name":"c","value":"d"}]"#;
        let cookies = decode(&b64(json));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "b");
        assert_eq!(cookies["c"], "d");
    }

    #[test]
    fn test_base64_json_single_object() {
        let cookies = decode(&b64(r#"{"name":"only","value":"one"}"#));
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["only"], "one");
    }

    #[test]
    fn test_base64_json_flat_map_keeps_strings_only() {
        let cookies = decode(&b64(r#"{"a":"1","b":2,"c":"3"}"#));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "1");
        assert_eq!(cookies["c"], "3");
        assert!(!cookies.contains_key("b"));
    }

    #[test]
    fn test_base64_json_array_skips_malformed_entries() {
        let json = r#"[{"name":"a","value":"b"}, {"noname":true}, {"name":"c","value":"d"}]"#;
        let cookies = decode(&b64(json));
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_base64_quoted_form_with_truncated_braces() {
        // The exporter's join strips the closing brace of each object; the
        // trailing ";" marker is part of the format
        let text = r#"{"domain":"x","name":"a","value":"b";{"domain":"x","name":"c","value":"d"};";""#;
        let cookies = decode(&b64(text));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "b");
        assert_eq!(cookies["c"], "d");
    }

    #[test]
    fn test_base64_quoted_form_skips_broken_segments() {
        let text = r#"{"name":"a","value":"b";{"name": broken";{"name":"c","value":"d"};";""#;
        let cookies = decode(&b64(text));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies["a"], "b");
        assert_eq!(cookies["c"], "d");
    }

    #[test]
    fn test_base64_plain_pairs_without_url_decoding() {
        let cookies = decode(&b64("a=%3D; b=2"));
        // Inside an envelope the values are taken verbatim
        assert_eq!(cookies["a"], "%3D");
        assert_eq!(cookies["b"], "2");
    }

    #[test]
    fn test_invalid_base64_yields_empty_map() {
        assert!(decode("!!! not base64 !!!").is_empty());
    }

    #[test]
    fn test_base64_of_non_utf8_yields_empty_map() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert!(decode(&encoded).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(decode("").is_empty());
    }

    #[test]
    fn test_json_parse_failure_falls_through_to_plain_pairs() {
        // Starts with '{' but is not valid JSON; still contains '=' pairs
        let cookies = decode(&b64("{broken json} a=1; b=2"));
        assert_eq!(cookies["b"], "2");
    }
}
