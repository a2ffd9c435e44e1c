use crate::{config::RecorderConfiguration, error::Error, fixtures};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde_json::Value;
use std::{fs, path::Path};

lazy_static! {
    /// Field name -> optional capture pattern. A rule without a
    /// pattern blanks any value stored under that exact key; a rule
    /// with a pattern additionally scrubs matching tokens out of
    /// string values under *other* keys (query strings, signed URLs).
    static ref RULES: Vec<(&'static str, Option<Regex>)> = vec![
        ("jwt", Some(Regex::new(r#"jwt=([^&^"]+)"#).unwrap())),
        ("bucket_id", Some(Regex::new(r"/(\w{32})/").unwrap())),
        ("Signature", Some(Regex::new(r#"Signature=([^&^"]+)"#).unwrap())),
        ("AWSAccessKeyId", Some(Regex::new(r#"AWSAccessKeyId=([^&^"]+)"#).unwrap())),
        ("Expires", Some(Regex::new(r#"Expires=([^&^"]+)"#).unwrap())),
        ("Date", None),
        ("Set-Cookie", None),
        ("token", None),
    ];
}

/// Recursively redact sensitive content in place.
///
/// At each mapping node every rule is applied once: a key equal to a
/// rule's field name has its whole value replaced by the uppercased
/// field name; string values are scrubbed with every pattern rule;
/// nested mappings are descended into. Sequences are frozen element
/// by element, but a sequence stored as a mapping value is left as is.
/// The operation is idempotent.
pub fn freeze(json: &mut Value) {
    match json {
        Value::Array(items) => {
            for item in items {
                freeze(item);
            }
        }
        Value::Object(map) => {
            for (key, value) in map.iter_mut() {
                if let Some((field, _)) = RULES.iter().find(|rule| rule.0 == key.as_str()) {
                    *value = Value::String(field.to_uppercase());
                    continue;
                }

                match value {
                    Value::String(string) => scrub_string(string),
                    Value::Object(_) => freeze(value),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

/// Substitutes every occurrence of a captured token with the
/// uppercased field name, leaving the rest of the string intact.
fn scrub_string(string: &mut String) {
    for (field, pattern) in RULES.iter() {
        if let Some(pattern) = pattern {
            let token = pattern
                .captures(string)
                .map(|captures| captures[1].to_string());

            if let Some(token) = token {
                *string = string.replace(&token, &field.to_uppercase());
            }
        }
    }
}

/// Freeze all saved snapshots and write the redacted copies to the
/// destination folder, overwriting if necessary.
pub fn freeze_and_archive<P: AsRef<Path>>(
    config: &RecorderConfiguration,
    destination: P,
) -> Result<(), Error> {
    let destination = destination.as_ref();

    if !destination.is_dir() {
        return Err(Error::NotADirectory(destination.into()));
    }

    for path in fixtures::snapshot_files(config.user_dir())? {
        let contents = fs::read_to_string(&path)?;
        let mut snapshot: Value = serde_json::from_str(&contents)?;

        freeze(&mut snapshot);

        let filename = path.file_name().unwrap_or_default();
        let target = destination.join(filename);
        fs::write(&target, serde_json::to_string_pretty(&snapshot)?)?;
        debug!("Archived frozen snapshot to {}", target.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn token_value_is_blanked_outright() {
        let mut value = json!({ "token": "abcdef123456" });
        freeze(&mut value);
        assert_eq!(value, json!({ "token": "TOKEN" }));
    }

    #[test]
    fn signature_token_is_scrubbed_inside_string() {
        let mut value = json!({ "upload_url": "Signature=abc123&foo=bar" });
        freeze(&mut value);
        assert_eq!(value, json!({ "upload_url": "Signature=SIGNATURE&foo=bar" }));
    }

    #[test]
    fn jwt_is_scrubbed_from_query_strings() {
        let mut value = json!({ "url": "https://example.org/search?jwt=eyJhbGci&size=10" });
        freeze(&mut value);
        assert_eq!(
            value,
            json!({ "url": "https://example.org/search?jwt=JWT&size=10" })
        );
    }

    #[test]
    fn bucket_id_is_scrubbed_from_paths() {
        let mut value = json!({
            "path": "/0123456789abcdef0123456789abcdef/datapackage.json"
        });
        freeze(&mut value);
        assert_eq!(
            value,
            json!({ "path": "/BUCKET_ID/datapackage.json" })
        );
    }

    #[test]
    fn set_cookie_and_date_headers_are_blanked() {
        let mut value = json!({
            "Date": "Tue, 15 Nov 1994 08:12:31 GMT",
            "Set-Cookie": "session=deadbeef; HttpOnly",
            "Content-Type": "application/json"
        });
        freeze(&mut value);
        assert_eq!(
            value,
            json!({
                "Date": "DATE",
                "Set-Cookie": "SET-COOKIE",
                "Content-Type": "application/json"
            })
        );
    }

    #[test]
    fn nested_mappings_are_descended_into() {
        let mut value = json!({
            "outer": { "inner": { "token": "secret" } }
        });
        freeze(&mut value);
        assert_eq!(
            value,
            json!({ "outer": { "inner": { "token": "TOKEN" } } })
        );
    }

    #[test]
    fn sequence_elements_are_frozen() {
        let mut value = json!([
            { "token": "one" },
            { "token": "two" }
        ]);
        freeze(&mut value);
        assert_eq!(value, json!([{ "token": "TOKEN" }, { "token": "TOKEN" }]));
    }

    #[test]
    fn multiple_rules_apply_to_one_string() {
        let signed = "AWSAccessKeyId=AKIAIOSFODNN7&Signature=abc123&Expires=1467136";
        let mut value = json!({ "signed_url": signed });
        freeze(&mut value);
        assert_eq!(
            value,
            json!({
                "signed_url":
                    "AWSAccessKeyId=AWSACCESSKEYID&Signature=SIGNATURE&Expires=EXPIRES"
            })
        );
    }

    #[test]
    fn freezing_is_idempotent() {
        let mut once = json!({
            "token": "secret",
            "url": "Signature=abc123&jwt=eyJhbGci&x=1",
            "nested": { "Set-Cookie": "session=1" }
        });
        freeze(&mut once);

        let mut twice = once.clone();
        freeze(&mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn non_rule_scalars_are_untouched() {
        let mut value = json!({ "count": 3, "name": "budget", "ok": true });
        let expected = value.clone();
        freeze(&mut value);
        assert_eq!(value, expected);
    }
}
