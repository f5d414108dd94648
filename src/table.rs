use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::ClassifiedRecord;
use crate::error::SyncError;

static TOOLS_ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"initializeTools\(\) \{\s*return ").unwrap());

const ENTRY_INDENT: &str = "            ";
const FIELD_INDENT: &str = "                ";

/// Records as the generated table holds them: in input order, one per key.
/// A repeated key keeps its first position but takes the last record's
/// values, as a JS object literal would.
pub fn keyed_entries(records: &[ClassifiedRecord]) -> Vec<(String, &ClassifiedRecord)> {
    let mut entries: Vec<(String, &ClassifiedRecord)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for record in records {
        let key = record.table_key();
        match positions.get(&key).copied() {
            Some(i) => entries[i].1 = record,
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push((key, record));
            }
        }
    }
    entries
}

/// Render the object literal returned by `initializeTools()`.
pub fn render_tools_object(records: &[ClassifiedRecord]) -> String {
    let entries = keyed_entries(records);
    let rendered: Vec<String> = entries
        .iter()
        .map(|(key, record)| render_entry(key, record))
        .collect();
    let mut out = String::from("{");
    if !rendered.is_empty() {
        out.push('\n');
        out.push_str(&rendered.join(",\n"));
    }
    out.push_str("\n        }");
    out
}

fn render_entry(key: &str, record: &ClassifiedRecord) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "{ENTRY_INDENT}'{}': {{", js_escape(key));
    let _ = writeln!(s, "{FIELD_INDENT}name: '{}',", js_escape(&record.display_name));
    let _ = writeln!(s, "{FIELD_INDENT}category: '{}',", record.category);
    let _ = writeln!(s, "{FIELD_INDENT}description: '{}',", js_escape(&record.description));
    let _ = writeln!(s, "{FIELD_INDENT}priority: '{}',", record.priority);
    let _ = writeln!(s, "{FIELD_INDENT}techLevel: '{}',", record.tech_level);
    let _ = writeln!(s, "{FIELD_INDENT}contexts: {},", json_list(record.contexts.iter().map(|c| c.as_str())));
    let _ = writeln!(s, "{FIELD_INDENT}subjects: {}", json_list(record.subjects.iter().map(|c| c.as_str())));
    let _ = write!(s, "{ENTRY_INDENT}}}");
    s
}

/// `["a", "b"]`
fn json_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = items.map(|i| format!("\"{i}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Escape for a single-quoted JS string literal.
pub fn js_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Swap the object literal returned by `initializeTools()` for `object`,
/// leaving every other byte of `js` untouched.
pub fn replace_tools_object(js: &str, object: &str) -> Result<String, SyncError> {
    let not_found = || SyncError::AnchorNotFound("initializeTools() return object");

    let anchor = TOOLS_ANCHOR_RE.find(js).ok_or_else(not_found)?;
    let start = anchor.end();
    if !js[start..].starts_with('{') {
        return Err(not_found());
    }
    let end = matching_brace(js, start).ok_or_else(not_found)?;
    if !js[end + 1..].starts_with(';') {
        return Err(not_found());
    }

    let mut out = String::with_capacity(js.len() + object.len());
    out.push_str(&js[..start]);
    out.push_str(object);
    out.push_str(&js[end + 1..]);
    Ok(out)
}

/// Byte index of the `}` closing the `{` at `open`. Braces inside string
/// literals and comments are ignored.
fn matching_brace(js: &str, open: usize) -> Option<usize> {
    let bytes = js.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawRecord;
    use crate::classify::rules::RuleSet;
    use crate::classify::Classifier;

    fn classified(name: &str, description: &str) -> ClassifiedRecord {
        let rules = RuleSet::standard();
        Classifier::new(&rules).classify(&RawRecord {
            name: name.to_string(),
            original_category: "web-application".to_string(),
            description: description.to_string(),
            topics: String::new(),
        })
    }

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/recommendation_engine.js").unwrap()
    }

    #[test]
    fn renders_generator_layout() {
        let records = vec![classified("class-pulse", "real-time audience polls")];
        let expected = "{\n            'classpulse': {\n                name: 'Class Pulse',\n                category: 'student_interaction',\n                description: 'Real-time audience polls.',\n                priority: 'high',\n                techLevel: 'intermediate',\n                contexts: [\"general\"],\n                subjects: [\"general\"]\n            }\n        }";
        assert_eq!(render_tools_object(&records), expected);
    }

    #[test]
    fn entries_separated_and_ordered() {
        let records = vec![
            classified("study-buddy", "ai tutoring"),
            classified("class-pulse", "audience polls"),
        ];
        let out = render_tools_object(&records);
        let study = out.find("'studybuddy'").unwrap();
        let pulse = out.find("'classpulse'").unwrap();
        assert!(study < pulse);
        assert!(out.contains("            },\n            'classpulse': {"));
        assert!(out.ends_with("            }\n        }"));
    }

    #[test]
    fn empty_catalog_renders_empty_object() {
        assert_eq!(render_tools_object(&[]), "{\n        }");
    }

    #[test]
    fn extracted_cards_render_one_entry_each() {
        let markup = concat!(
            "<div id=\"repo-grid\">\n",
            "<div class=\"repo-card\" data-category=\"desktop-application\" data-name=\"study-buddy\" data-description=\"ai tutoring without internet\"></div>\n",
            "<div class=\"repo-card\" data-category=\"web-application\" data-name=\"class-pulse\" data-description=\"real-time audience polls\"></div>\n",
            "</div>\n"
        );
        let raw = crate::parser::extract_records(markup, std::path::Path::new("index.html")).unwrap();
        let rules = RuleSet::standard();
        let classifier = Classifier::new(&rules);
        let records: Vec<_> = raw.iter().map(|r| classifier.classify(r)).collect();

        let out = render_tools_object(&records);
        assert_eq!(out.matches("': {").count(), 2);
        assert_eq!(out.matches("'studybuddy': {").count(), 1);
        assert_eq!(out.matches("'classpulse': {").count(), 1);
        assert!(out.contains("category: 'ai_tutoring'"));
        assert!(out.contains("category: 'student_interaction'"));
    }

    #[test]
    fn duplicate_key_keeps_first_position_last_value() {
        let records = vec![
            classified("deep-brief", "first"),
            classified("slinkr", "url toolkit"),
            classified("deep-brief", "second"),
        ];
        let out = render_tools_object(&records);
        assert_eq!(out.matches("'deepbrief'").count(), 1);
        assert!(out.contains("description: 'Second.'"));
        assert!(!out.contains("First."));
        assert!(out.find("'deepbrief'").unwrap() < out.find("'slinkr'").unwrap());
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(js_escape(r"it's a\b"), r"it\'s a\\b");
        let out = render_tools_object(&[classified("slinkr", "teacher's url toolkit")]);
        assert!(out.contains(r"description: 'Teacher\'s url toolkit.',"));
    }

    #[test]
    fn replaces_only_the_tools_object() {
        let js = fixture();
        let object = render_tools_object(&[classified("class-pulse", "audience polls")]);
        let out = replace_tools_object(&js, &object).unwrap();

        assert!(out.contains("'classpulse'"));
        assert!(!out.contains("'deeptalk'"));
        assert!(!out.contains("'oddone'"));
        assert!(out.contains("initializeTools() {\n        return {\n            'classpulse'"));
        assert!(out.contains("            }\n        };\n    }\n\n    initializeCategories() {"));
        let tail = &js[js.find("    initializeCategories()").unwrap()..];
        assert!(out.ends_with(tail));
    }

    #[test]
    fn replacement_is_idempotent() {
        let js = fixture();
        let object = render_tools_object(&[
            classified("study-buddy", "ai tutoring"),
            classified("class-pulse", "audience polls"),
        ]);
        let once = replace_tools_object(&js, &object).unwrap();
        let twice = replace_tools_object(&once, &object).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn braces_in_strings_and_comments_ignored() {
        let js = "initializeTools() {\n  return {\n    // }\n    'a': { d: '}' , e: \"{\" }\n  };\n}";
        let out = replace_tools_object(js, "{}").unwrap();
        assert_eq!(out, "initializeTools() {\n  return {};\n}");
    }

    #[test]
    fn missing_anchor_is_reported() {
        let err = replace_tools_object("const tools = {};", "{}").unwrap_err();
        assert!(matches!(err, SyncError::AnchorNotFound(_)));

        // unbalanced payload
        let err = replace_tools_object("initializeTools() { return { 'a': {", "{}").unwrap_err();
        assert!(matches!(err, SyncError::AnchorNotFound(_)));

        // object not followed by `;`
        let err = replace_tools_object("initializeTools() { return {} }", "{}").unwrap_err();
        assert!(matches!(err, SyncError::AnchorNotFound(_)));
    }
}
