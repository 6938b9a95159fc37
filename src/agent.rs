//! javaagent option handling for JVM launch strings.
//!
//! Detection of an existing Lombok agent is format based: any `-javaagent:`
//! token whose path ends in `lombok.jar` counts, whatever directory it points
//! at. Merging never replaces such a token, so the first agent written wins.

use regex::Regex;
use std::sync::LazyLock;

static LOMBOK_AGENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)-javaagent:(?:"(?:[^"\\]|\\.)*lombok\.jar"|[^\s"']*lombok\.jar(?:[\s=]|$))"#)
        .expect("valid javaagent pattern")
});

pub fn has_lombok_agent(options: &str) -> bool {
    LOMBOK_AGENT.is_match(options)
}

pub fn format_agent(jar_path: &str) -> String {
    if !jar_path.chars().any(char::is_whitespace) {
        return format!("-javaagent:{jar_path}");
    }
    let escaped = jar_path.replace('"', "\\\"");
    format!("-javaagent:\"{escaped}\"")
}

/// Appends the javaagent token for `jar_path` to `existing` unless an agent is
/// already present. The result is trimmed and single-space separated at the
/// join point.
pub fn merge_options(existing: Option<&str>, jar_path: &str) -> String {
    let normalized = existing.map(str::trim).unwrap_or_default();
    if has_lombok_agent(normalized) {
        return normalized.to_string();
    }

    let token = format_agent(jar_path);
    if contains_token(normalized, &token) {
        return normalized.to_string();
    }

    if normalized.is_empty() {
        token
    } else {
        format!("{normalized} {token}")
    }
}

fn contains_token(haystack: &str, token: &str) -> bool {
    haystack.match_indices(token).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + token.len()..].chars().next();
        before.is_none_or(char::is_whitespace) && after.is_none_or(char::is_whitespace)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_agent_plain_path_is_verbatim() {
        assert_eq!(format_agent("/tmp/lombok.jar"), "-javaagent:/tmp/lombok.jar");
    }

    #[test]
    fn format_agent_quotes_and_escapes_when_path_has_whitespace() {
        assert_eq!(
            format_agent("/Users/me/Library/Application Support/opencode/bin/jdtls/bin/lombok.jar"),
            "-javaagent:\"/Users/me/Library/Application Support/opencode/bin/jdtls/bin/lombok.jar\""
        );
        assert_eq!(
            format_agent("/odd \"dir\"/lombok.jar"),
            r#"-javaagent:"/odd \"dir\"/lombok.jar""#
        );
        assert_eq!(format_agent("/tab\there/lombok.jar"), "-javaagent:\"/tab\there/lombok.jar\"");
    }

    #[test]
    fn merge_into_nothing_yields_token() {
        assert_eq!(merge_options(None, "/tmp/lombok.jar"), "-javaagent:/tmp/lombok.jar");
        assert_eq!(merge_options(Some("   "), "/tmp/lombok.jar"), "-javaagent:/tmp/lombok.jar");
    }

    #[test]
    fn merge_preserves_existing_options() {
        let merged = merge_options(Some("  -Xmx2g  "), "/tmp/lombok.jar");
        assert_eq!(merged, "-Xmx2g -javaagent:/tmp/lombok.jar");
        assert!(merged.starts_with("-Xmx2g "));
    }

    #[test]
    fn merge_is_idempotent() {
        let jars = [
            "/tmp/lombok.jar",
            "/with space/lombok.jar",
            "/quote \"x\"/lombok.jar",
            "/tmp/custom-agent.jar",
        ];
        for existing in [None, Some(""), Some("-Xmx2g"), Some("-Dfoo=bar -Xss4m")] {
            for jar in jars {
                let once = merge_options(existing, jar);
                let twice = merge_options(Some(&once), jar);
                assert_eq!(once, twice, "existing={existing:?} jar={jar:?}");
            }
        }
    }

    #[test]
    fn existing_lombok_agent_is_kept_even_for_other_path() {
        let existing = "-Xmx2g -javaagent:/old/place/lombok.jar";
        assert_eq!(merge_options(Some(existing), "/new/place/lombok.jar"), existing);

        let quoted = r#"-javaagent:"/old place/Lombok.JAR" -Xmx1g"#;
        assert_eq!(merge_options(Some(quoted), "/tmp/lombok.jar"), quoted);
    }

    #[test]
    fn agent_detection_is_case_insensitive() {
        assert!(has_lombok_agent("-JAVAAGENT:/opt/LOMBOK.jar"));
        assert!(has_lombok_agent("-Xmx1g -javaagent:lombok.jar"));
        assert!(has_lombok_agent("-javaagent:/opt/lombok.jar=ECJ -Xmx1g"));
    }

    #[test]
    fn unrelated_agents_do_not_count() {
        assert!(!has_lombok_agent("-javaagent:/opt/jacoco.jar"));
        assert!(!has_lombok_agent("-javaagent:/opt/lombok.jar.bak"));
        let merged = merge_options(Some("-javaagent:/opt/jacoco.jar"), "/tmp/lombok.jar");
        assert_eq!(merged, "-javaagent:/opt/jacoco.jar -javaagent:/tmp/lombok.jar");
    }

    #[test]
    fn unquoted_path_with_quote_is_not_a_lombok_agent() {
        let first = merge_options(None, "/a\"b/lombok.jar");
        assert_eq!(first, "-javaagent:/a\"b/lombok.jar");
        assert!(!has_lombok_agent(&first));

        assert_eq!(merge_options(Some(&first), "/a\"b/lombok.jar"), first);
        assert_eq!(
            merge_options(Some(&first), "/tmp/lombok.jar"),
            "-javaagent:/a\"b/lombok.jar -javaagent:/tmp/lombok.jar"
        );
    }

    #[test]
    fn token_match_respects_boundaries() {
        let existing = "-javaagent:/tmp/agent.jar2";
        assert_eq!(
            merge_options(Some(existing), "/tmp/agent.jar"),
            "-javaagent:/tmp/agent.jar2 -javaagent:/tmp/agent.jar"
        );
    }
}
