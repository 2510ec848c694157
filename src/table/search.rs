use serde_json::{Number, Value};

/// Case-insensitive substring search over every string and number leaf of
/// a record, at any depth.
///
/// The query is trimmed first; a blank query matches every record. Booleans
/// and nulls never match.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use taskboard_core::table::search::matches;
///
/// let row = json!({"title": "Fix bug", "tags": [{"label": "Backend"}]});
/// assert!(matches(&row, "backend"));
/// assert!(!matches(&row, "frontend"));
/// ```
pub fn matches(record: &Value, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || contains(record, &needle)
}

fn contains(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Number(n) => number_text(n).contains(needle),
        Value::Array(items) => items.iter().any(|v| contains(v, needle)),
        Value::Object(fields) => fields.values().any(|v| contains(v, needle)),
        Value::Bool(_) | Value::Null => false,
    }
}

/// Numbers read the way a browser prints them: `2.0` is "2"
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
            format!("{f:.0}")
        }
        _ => n.to_string(),
    }
}

/// Records matching `query`, in their original order
pub fn search<'a>(records: &'a [Value], query: &str) -> Vec<&'a Value> {
    records.iter().filter(|r| matches(r, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Value> {
        vec![
            json!({"title": "Fix login bug", "priority": "high", "points": 3}),
            json!({"title": "Write docs", "meta": {"owner": {"name": "Dana"}}}),
            json!({"title": "Ship", "labels": ["Release", {"note": "needs QA"}]}),
            json!({"title": "Archive", "done": true, "parent": null}),
        ]
    }

    #[test]
    fn test_search_case_insensitive() {
        let rows = rows();
        assert_eq!(search(&rows, "LOGIN").len(), 1);
        assert_eq!(search(&rows, "login").len(), 1);
        assert_eq!(search(&rows, "LoGiN").len(), 1);
    }

    #[test]
    fn test_search_nested_objects_and_arrays() {
        let rows = rows();
        assert_eq!(search(&rows, "dana")[0]["title"], "Write docs");
        assert_eq!(search(&rows, "release")[0]["title"], "Ship");
        assert_eq!(search(&rows, "qa")[0]["title"], "Ship");
    }

    #[test]
    fn test_search_numbers() {
        let rows = rows();
        let hits = search(&rows, "3");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "Fix login bug");
    }

    #[test]
    fn test_blank_query_matches_all() {
        let rows = rows();
        assert_eq!(search(&rows, "").len(), rows.len());
        assert_eq!(search(&rows, "   ").len(), rows.len());
    }

    #[test]
    fn test_query_is_trimmed() {
        let rows = rows();
        assert_eq!(search(&rows, "  docs  ").len(), 1);
    }

    #[test]
    fn test_booleans_and_nulls_never_match() {
        let rows = rows();
        assert!(search(&rows, "true").is_empty());
        assert!(search(&rows, "null").is_empty());
    }

    #[test]
    fn test_whole_floats_read_as_integers() {
        let row = json!({"title": "Estimate", "points": 2.0, "ratio": 0.5});
        assert!(matches(&row, "2"));
        assert!(!matches(&row, "2.0"));
        assert!(!matches(&row, "2."));
        assert!(matches(&row, "0.5"));
    }
}
