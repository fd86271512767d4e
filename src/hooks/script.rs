use crate::hooks::{HookKind, MANAGED_MARKER};
use chrono::{DateTime, SecondsFormat, Utc};

/// Escape text for use inside a double-quoted bash string.
pub fn shell_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// The `sync` invocation that repairs a mismatch for this target.
///
/// Arguments are double-quoted and escaped so the line can be pasted into
/// a shell as printed.
pub fn sync_command(target_file: &str, version_pattern: &str) -> String {
    format!(
        "version-sync sync --target-file=\"{}\" --version-pattern=\"{}\"",
        shell_escape(target_file),
        shell_escape(version_pattern)
    )
}

/// Render the hook script for `kind`.
///
/// The script re-runs `version-sync validate` and blocks the git action
/// unless the verdict carries the success glyph.
///
/// # Arguments
/// * `kind` - Hook being generated
/// * `version` - Current version, recorded in the marker line
/// * `target_file` - Target file the hook validates against
/// * `version_pattern` - Line pattern for the target file
/// * `installed_at` - Installation timestamp for the header
pub fn generate(
    kind: HookKind,
    version: &str,
    target_file: &str,
    version_pattern: &str,
    installed_at: DateTime<Utc>,
) -> String {
    let timestamp = installed_at.to_rfc3339_opts(SecondsFormat::Secs, true);

    format!(
        r#"#!/bin/bash
{marker} v{version}
# Installed: {timestamp}
#
# This hook validates version consistency before {action}.
# Managed by version-sync - DO NOT EDIT MANUALLY

echo "Checking version consistency..."

if ! version-sync validate \
    --target-file="{target}" \
    --version-pattern="{pattern}" 2>&1 | grep -q "✅"; then
    echo "❌ Version mismatch detected!"
    echo "Run: {fix}"
    exit 1
fi

echo "✅ Version check passed"
exit 0
"#,
        marker = MANAGED_MARKER,
        version = version,
        timestamp = timestamp,
        action = kind.action(),
        target = shell_escape(target_file),
        pattern = shell_escape(version_pattern),
        fix = shell_escape(&sync_command(target_file, version_pattern)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape(r#"LABEL version=".*"$"#), r#"LABEL version=\".*\"\$"#);
        assert_eq!(shell_escape(r"^version\s*="), r"^version\\s*=");
        assert_eq!(shell_escape("a`b"), "a\\`b");
        assert_eq!(shell_escape("plain"), "plain");
    }

    #[test]
    fn test_generate_header() {
        let script = generate(HookKind::PreCommit, "1.2.3", "galaxy.yml", "^version:.*$", at());
        let mut lines = script.lines();
        assert_eq!(lines.next(), Some("#!/bin/bash"));
        assert_eq!(lines.next(), Some("# VERSION-SYNC-MANAGED: v1.2.3"));
        assert_eq!(lines.next(), Some("# Installed: 2024-05-01T12:30:00Z"));
        assert!(script.contains("before commit."));
        assert!(script.contains("DO NOT EDIT MANUALLY"));
    }

    #[test]
    fn test_generate_invocation() {
        let script = generate(
            HookKind::PrePush,
            "0.1.0",
            "pyproject.toml",
            r#"^version\s*=\s*".*"$"#,
            at(),
        );
        assert!(script.contains("before push."));
        assert!(script.contains(r#"--target-file="pyproject.toml""#));
        assert!(script.contains(r#"--version-pattern="^version\\s*=\\s*\".*\"\$""#));
        assert!(script.contains(r#"grep -q "✅""#));
        assert!(script.ends_with("exit 0\n"));
    }

    #[test]
    fn test_sync_command_carries_target_flags() {
        assert_eq!(
            sync_command("galaxy.yml", "^version:.*$"),
            r#"version-sync sync --target-file="galaxy.yml" --version-pattern="^version:.*\$""#
        );
    }

    #[test]
    fn test_generate_fix_hint_names_target() {
        let script = generate(HookKind::PreCommit, "1.2.3", "galaxy.yml", "^version:.*$", at());
        assert!(script.contains(
            r#"echo "Run: version-sync sync --target-file=\"galaxy.yml\" --version-pattern=\"^version:.*\\\$\"""#
        ));
        assert!(!script.contains("echo \"Run: version-sync sync\"\n"));
    }
}
