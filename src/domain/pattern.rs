use crate::error::{Result, VersionSyncError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// First `X.Y.Z` run anywhere in a line.
pub(crate) fn numeric_version_regex() -> &'static Regex {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC.get_or_init(|| Regex::new(r"\d+\.\d+\.\d+").expect("static regex is valid"))
}

/// Line-matching rule used to locate the version line in a target file.
///
/// Matching is anchored at the start of the line but does not have to cover
/// the whole line, so `version:` matches `version: 1.2.3`.
#[derive(Debug, Clone)]
pub struct VersionPattern {
    source: String,
    anchored: Regex,
}

impl VersionPattern {
    /// Compile a user-supplied pattern.
    ///
    /// The pattern must be valid on its own; wrapping it in the anchoring
    /// group must not rescue unbalanced input such as `a)(b`.
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |e: regex::Error| VersionSyncError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        };
        Regex::new(pattern).map_err(invalid)?;
        let anchored = Regex::new(&format!("^(?:{})", pattern)).map_err(invalid)?;
        Ok(VersionPattern {
            source: pattern.to_string(),
            anchored,
        })
    }

    /// The pattern as the user wrote it.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// A carriage return ending the line is not part of what is matched.
    pub fn matches(&self, line: &str) -> bool {
        self.anchored.is_match(line.strip_suffix('\r').unwrap_or(line))
    }

    /// Index and text of the first line (split on `\n`) the pattern matches.
    pub fn find_line<'a>(&self, content: &'a str) -> Option<(usize, &'a str)> {
        content
            .split('\n')
            .enumerate()
            .find(|(_, line)| self.matches(line))
    }
}

impl fmt::Display for VersionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Extracts the version embedded in the first line matching `pattern`.
///
/// Scanning stops at the first matching line. Returns `None` when no line
/// matches or when that line holds no `X.Y.Z` run.
pub fn extract(content: &str, pattern: &VersionPattern) -> Option<String> {
    let (index, line) = pattern.find_line(content)?;
    let found = numeric_version_regex().find(line).map(|m| m.as_str().to_string());
    tracing::debug!(line = index + 1, found = ?found, "version line matched");
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml() -> VersionPattern {
        VersionPattern::new(r"^version:.*$").unwrap()
    }

    #[test]
    fn test_extract_yaml_version() {
        let content = "name: x\nversion: 1.2.3\n";
        assert_eq!(extract(content, &yaml()), Some("1.2.3".to_string()));
    }

    #[test]
    fn test_extract_no_matching_line() {
        let content = "name: x\ndescription: thing\n";
        assert_eq!(extract(content, &yaml()), None);
    }

    #[test]
    fn test_extract_matching_line_without_digits() {
        let content = "name: x\nversion: unknown\nother: 1.2.3\n";
        assert_eq!(extract(content, &yaml()), None);
    }

    #[test]
    fn test_extract_first_match_wins() {
        let content = "version: 1.0.0\nversion: 2.0.0\n";
        assert_eq!(extract(content, &yaml()), Some("1.0.0".to_string()));
    }

    #[test]
    fn test_extract_stops_at_first_match_even_without_digits() {
        let content = "version: tbd\nversion: 2.0.0\n";
        assert_eq!(extract(content, &yaml()), None);
    }

    #[test]
    fn test_pattern_is_anchored_at_line_start() {
        let pattern = VersionPattern::new("version").unwrap();
        assert!(pattern.matches("version = \"1.0.0\""));
        assert!(!pattern.matches("  version = \"1.0.0\""));
        assert!(!pattern.matches("# version 1.0.0"));
    }

    #[test]
    fn test_pattern_prefix_match_is_enough() {
        let pattern = VersionPattern::new("version:").unwrap();
        assert!(pattern.matches("version: 1.0.0 # trailing comment"));
    }

    #[test]
    fn test_dockerfile_pattern_without_caret_still_anchors() {
        let pattern = VersionPattern::new(r#"LABEL version=".*"$"#).unwrap();
        assert!(pattern.matches(r#"LABEL version="1.0.0""#));
        assert!(!pattern.matches(r#"  LABEL version="1.0.0""#));
    }

    #[test]
    fn test_extract_toml_version() {
        let pattern = VersionPattern::new(r#"^version\s*=\s*".*"$"#).unwrap();
        let content = "[project]\nname = \"demo\"\nversion = \"0.4.2\"\n";
        assert_eq!(extract(content, &pattern), Some("0.4.2".to_string()));
    }

    #[test]
    fn test_extract_takes_first_numeric_run() {
        let pattern = VersionPattern::new("image:").unwrap();
        let content = "image: registry:5000/app:1.2.3-build.4.5.6\n";
        assert_eq!(extract(content, &pattern), Some("1.2.3".to_string()));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = VersionPattern::new("version(").unwrap_err();
        assert!(matches!(err, VersionSyncError::InvalidPattern { .. }));
        assert!(err.to_string().contains("version("));
    }

    #[test]
    fn test_unbalanced_pattern_is_rejected() {
        for source in ["a)(b", "version:)|(x"] {
            let err = VersionPattern::new(source).unwrap_err();
            assert!(matches!(err, VersionSyncError::InvalidPattern { .. }));
            assert!(err.to_string().contains(source));
        }
    }

    #[test]
    fn test_end_anchor_matches_crlf_line() {
        let pattern = VersionPattern::new(r#"^version\s*=\s*".*"$"#).unwrap();
        assert!(pattern.matches("version = \"0.1.0\"\r"));
        let content = "[project]\r\nversion = \"0.1.0\"\r\n";
        assert_eq!(extract(content, &pattern), Some("0.1.0".to_string()));
        let (index, line) = pattern.find_line(content).unwrap();
        assert_eq!(index, 1);
        assert_eq!(line, "version = \"0.1.0\"\r");
    }

    #[test]
    fn test_find_line_index() {
        let (index, line) = yaml().find_line("a: 1\nb: 2\nversion: 3.0.0").unwrap();
        assert_eq!(index, 2);
        assert_eq!(line, "version: 3.0.0");
    }

    #[test]
    fn test_pattern_display_is_source() {
        assert_eq!(yaml().to_string(), "^version:.*$");
    }
}
