use crate::error::{Result, VersionSyncError};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Strict `X.Y.Z` grammar applied to trimmed version text.
fn semver_regex() -> &'static Regex {
    static SEMVER: OnceLock<Regex> = OnceLock::new();
    SEMVER.get_or_init(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("static regex is valid"))
}

/// Checks that `text` is exactly `X.Y.Z` once surrounding whitespace is trimmed.
///
/// No pre-release or build suffixes, no `v` prefix, exactly three numeric components.
pub fn validate(text: &str) -> Result<()> {
    let trimmed = text.trim();
    if semver_regex().is_match(trimmed) {
        Ok(())
    } else {
        Err(VersionSyncError::invalid_format(trimmed))
    }
}

/// One numeric part of a version, of any width.
///
/// Held as canonical decimal digits (no leading zeros, `0` for zero) so
/// that bumping never hits an integer ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component(String);

impl Component {
    /// Parse a run of ASCII digits. Leading zeros are dropped.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        Some(Component(if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }))
    }

    pub fn zero() -> Self {
        Component("0".to_string())
    }

    /// This value plus one, with carry across all digits.
    pub fn incremented(&self) -> Self {
        let mut digits = self.0.clone().into_bytes();
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                return Component(String::from_utf8(digits).unwrap_or_default());
            }
        }
        // Every digit carried: 99..9 becomes 100..0
        digits.insert(0, b'1');
        Component(String::from_utf8(digits).unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for Component {
    fn from(value: u64) -> Self {
        Component(value.to_string())
    }
}

impl Ord for Component {
    /// Canonical digits compare by length first, then digit by digit.
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Component {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic version representation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: Component,
    pub minor: Component,
    pub patch: Component,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major: major.into(),
            minor: minor.into(),
            patch: patch.into(),
        }
    }

    /// Parse version text, validating the grammar first.
    ///
    /// Components must be ASCII digits; anything else the grammar lets
    /// through fails with a parse error naming the text.
    pub fn parse(text: &str) -> Result<Self> {
        validate(text)?;
        let trimmed = text.trim();

        let mut parts = trimmed.split('.').map(|part| {
            Component::parse(part).ok_or_else(|| {
                VersionSyncError::parse(trimmed, format!("'{}' is not a decimal integer", part))
            })
        });
        let mut next = || {
            parts
                .next()
                .unwrap_or_else(|| Err(VersionSyncError::parse(trimmed, "missing component")))
        };

        Ok(Version {
            major: next()?,
            minor: next()?,
            patch: next()?,
        })
    }

    /// Bump version according to bump kind.
    ///
    /// Lower-order components are reset to zero.
    pub fn bump(&self, kind: BumpKind) -> Self {
        match kind {
            BumpKind::Major => Version {
                major: self.major.incremented(),
                minor: Component::zero(),
                patch: Component::zero(),
            },
            BumpKind::Minor => Version {
                major: self.major.clone(),
                minor: self.minor.incremented(),
                patch: Component::zero(),
            },
            BumpKind::Patch => Version {
                major: self.major.clone(),
                minor: self.minor.clone(),
                patch: self.patch.incremented(),
            },
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = VersionSyncError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version bump kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl BumpKind {
    pub fn name(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl FromStr for BumpKind {
    type Err = VersionSyncError;

    /// Exact, case-sensitive match. Callers normalise case beforehand.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(VersionSyncError::InvalidBumpKind {
                kind: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Computes the next version from raw texts.
///
/// The kind is checked before the version so an invalid kind is reported
/// even when the version is also malformed.
pub fn bump_str(version: &str, kind: &str) -> Result<Version> {
    let kind: BumpKind = kind.parse()?;
    Ok(Version::parse(version)?.bump(kind))
}
