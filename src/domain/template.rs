//! Rewriting of the version line in a target file.

use crate::domain::pattern::{numeric_version_regex, VersionPattern};
use crate::error::{Result, VersionSyncError};
use regex::NoExpand;

/// How a matched version line is rewritten.
///
/// Chosen by sniffing the original line; see [`LineTemplate::sniff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTemplate {
    /// `version: X.Y.Z`
    Yaml,
    /// `version = "X.Y.Z"`
    Assignment,
    /// `LABEL version="X.Y.Z"`
    DockerLabel,
    /// Replace the first `X.Y.Z` run, keep the rest of the line.
    Generic,
}

impl LineTemplate {
    /// Picks a template from the original line, first rule wins:
    /// `version:`, then `version =` / `version=`, then `LABEL version=`,
    /// then the generic numeric substitution.
    ///
    /// `LABEL version=` also contains `version=`, so Dockerfile labels are
    /// rendered by the assignment template.
    pub fn sniff(line: &str) -> Self {
        if line.contains("version:") {
            LineTemplate::Yaml
        } else if line.contains("version =") || line.contains("version=") {
            LineTemplate::Assignment
        } else if line.contains("LABEL version=") {
            LineTemplate::DockerLabel
        } else {
            LineTemplate::Generic
        }
    }

    pub fn render(&self, line: &str, version: &str) -> String {
        match self {
            LineTemplate::Yaml => format!("version: {}", version),
            LineTemplate::Assignment => format!("version = \"{}\"", version),
            LineTemplate::DockerLabel => format!("LABEL version=\"{}\"", version),
            LineTemplate::Generic => numeric_version_regex()
                .replace(line, NoExpand(version))
                .into_owned(),
        }
    }
}

/// Rewrites the first line of `content` matching `pattern` to carry `version`.
///
/// Every other line is left byte-identical; line count and the trailing
/// newline are preserved. `file` only names the target in the error.
pub fn sync(content: &str, version: &str, pattern: &VersionPattern, file: &str) -> Result<String> {
    let (index, _) = pattern
        .find_line(content)
        .ok_or_else(|| VersionSyncError::pattern_not_found(file, pattern.as_str()))?;
    let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();

    // CRLF files keep their carriage return on the rewritten line
    let (body, cr) = match lines[index].strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (lines[index].as_str(), ""),
    };
    let template = LineTemplate::sniff(body);
    let rewritten = format!("{}{}", template.render(body, version), cr);
    tracing::debug!(
        file = %file,
        line = index + 1,
        template = ?template,
        before = %lines[index],
        after = %rewritten,
        "rewriting version line"
    );
    lines[index] = rewritten;

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pattern(p: &str) -> VersionPattern {
        VersionPattern::new(p).unwrap()
    }

    #[test]
    fn test_sync_yaml_round_trip() {
        let content = "namespace: acme\nname: tools\nversion: 1.0.0\nreadme: README.md\n";
        let out = sync(content, "2.0.0", &pattern(r"^version:.*$"), "galaxy.yml").unwrap();

        let before: Vec<&str> = content.split('\n').collect();
        let after: Vec<&str> = out.split('\n').collect();
        assert_eq!(before.len(), after.len());
        for (i, (b, a)) in before.iter().zip(after.iter()).enumerate() {
            if i == 2 {
                assert_eq!(*a, "version: 2.0.0");
            } else {
                assert_eq!(a, b);
            }
        }
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_sync_toml_always_double_quotes() {
        let content = "[project]\nname = 'demo'\nversion = '0.1.0'\n";
        let out = sync(content, "0.2.0", &pattern(r"^version\s*=.*$"), "pyproject.toml").unwrap();
        assert_eq!(out, "[project]\nname = 'demo'\nversion = \"0.2.0\"\n");
    }

    #[test]
    fn test_sync_compact_assignment() {
        let content = "version=\"1.0.0\"";
        let out = sync(content, "1.0.1", &pattern("version="), "setup.cfg").unwrap();
        assert_eq!(out, "version = \"1.0.1\"");
    }

    #[test]
    fn test_sync_dockerfile_label_uses_assignment_template() {
        let content = "FROM alpine:3.19\nLABEL version=\"1.0.0\"\nCMD [\"sh\"]";
        let out = sync(content, "1.1.0", &pattern(r#"LABEL version=".*"$"#), "Dockerfile").unwrap();
        assert_eq!(out, "FROM alpine:3.19\nversion = \"1.1.0\"\nCMD [\"sh\"]");
    }

    #[test]
    fn test_sync_generic_keeps_surrounding_text() {
        let content = "appVersion: \"x\"\n__version__ = '3.4.5'  # bumped\n";
        let out = sync(content, "3.5.0", &pattern("__version__"), "pkg/__init__.py").unwrap();
        assert_eq!(out, "appVersion: \"x\"\n__version__ = '3.5.0'  # bumped\n");
    }

    #[test]
    fn test_sync_generic_replaces_only_first_run() {
        let content = "RELEASE 1.0.0 (compat 0.9.0)";
        let out = sync(content, "1.1.0", &pattern("RELEASE"), "NOTES").unwrap();
        assert_eq!(out, "RELEASE 1.1.0 (compat 0.9.0)");
    }

    #[test]
    fn test_sync_only_first_matching_line() {
        let content = "version: 1.0.0\nversion: 1.0.0\n";
        let out = sync(content, "2.0.0", &pattern(r"^version:.*$"), "Chart.yaml").unwrap();
        assert_eq!(out, "version: 2.0.0\nversion: 1.0.0\n");
    }

    #[test]
    fn test_sync_pattern_not_found() {
        let content = "name: tools\n";
        let err = sync(content, "2.0.0", &pattern(r"^version:.*$"), "galaxy.yml").unwrap_err();
        assert!(matches!(err, VersionSyncError::PatternNotFound { .. }));
        let msg = err.to_string();
        assert!(msg.contains("galaxy.yml"));
        assert!(msg.contains("YAML"));
        assert!(msg.contains("Dockerfile"));
    }

    #[test]
    fn test_sync_without_trailing_newline() {
        let content = "version: 0.0.1";
        let out = sync(content, "0.0.2", &pattern("version:"), "Chart.yaml").unwrap();
        assert_eq!(out, "version: 0.0.2");
    }

    #[test]
    fn test_sync_keeps_crlf() {
        let content = "name: tools\r\nversion: 1.0.0\r\n";
        let out = sync(content, "1.0.1", &pattern("version:"), "galaxy.yml").unwrap();
        assert_eq!(out, "name: tools\r\nversion: 1.0.1\r\n");
    }

    #[test]
    fn test_sync_crlf_with_end_anchored_pattern() {
        let content = "[project]\r\nversion = \"0.1.0\"\r\n";
        let toml = pattern(r#"^version\s*=\s*".*"$"#);
        let out = sync(content, "0.2.0", &toml, "pyproject.toml").unwrap();
        assert_eq!(out, "[project]\r\nversion = \"0.2.0\"\r\n");

        let chart = "apiVersion: v2\r\nversion: 1.0.0\r\n";
        let out = sync(chart, "1.1.0", &pattern(r"^version:.*$"), "Chart.yaml").unwrap();
        assert_eq!(out, "apiVersion: v2\r\nversion: 1.1.0\r\n");
    }

    #[test]
    fn test_generic_render_treats_dollar_literally() {
        let out = LineTemplate::Generic.render("v 1.0.0", "$1.0.0");
        assert_eq!(out, "v $1.0.0");
    }

    #[rstest]
    #[case("version: 1.0.0", LineTemplate::Yaml)]
    #[case("  version: 1.0.0", LineTemplate::Yaml)]
    #[case("version = \"1.0.0\"", LineTemplate::Assignment)]
    #[case("version='1.0.0'", LineTemplate::Assignment)]
    #[case("LABEL version=\"1.0.0\"", LineTemplate::Assignment)]
    #[case("__version__ = \"1.0.0\"", LineTemplate::Generic)]
    #[case("VERSION 1.0.0", LineTemplate::Generic)]
    fn test_sniff(#[case] line: &str, #[case] expected: LineTemplate) {
        assert_eq!(LineTemplate::sniff(line), expected);
    }

    #[test]
    fn test_docker_label_render() {
        assert_eq!(
            LineTemplate::DockerLabel.render("", "4.5.6"),
            "LABEL version=\"4.5.6\""
        );
    }
}
