use crate::error::{DevError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// The version of a project with no recorded history
    pub const ZERO: SemanticVersion = SemanticVersion::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `X.Y.Z` triple (e.g., "1.2.3" -> SemanticVersion(1,2,3))
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return Err(DevError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                text
            )));
        }

        let component = |name: &str, part: &str| -> Result<u64> {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(DevError::version(format!(
                    "Invalid {} version: '{}'",
                    name, part
                )));
            }
            part.parse::<u64>()
                .map_err(|_| DevError::version(format!("Invalid {} version: '{}'", name, part)))
        };

        Ok(SemanticVersion {
            major: component("major", parts[0])?,
            minor: component("minor", parts[1])?,
            patch: component("patch", parts[2])?,
        })
    }

    /// Bump version according to bump kind
    ///
    /// Fails when the incremented component is already `u64::MAX`.
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let increment = |value: u64| {
            value.checked_add(1).ok_or_else(|| {
                DevError::version(format!("Cannot bump {}: {} component overflow", self, kind))
            })
        };

        Ok(match kind {
            BumpKind::Major => SemanticVersion::new(increment(self.major)?, 0, 0),
            BumpKind::Minor => SemanticVersion::new(self.major, increment(self.minor)?, 0),
            BumpKind::Patch => SemanticVersion::new(self.major, self.minor, increment(self.patch)?),
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemanticVersion {
    type Err = DevError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BumpKind {
    Major,
    Minor,
    #[default]
    Patch,
}

impl BumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }

    /// Short human description used in changelog entries
    pub fn description(&self) -> &'static str {
        match self {
            BumpKind::Major => "Major change with breaking incompatibilities",
            BumpKind::Minor => "New backward-compatible features",
            BumpKind::Patch => "Bug fixes and small improvements",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = DevError;

    /// Only `major`, `minor` and `patch` are accepted; anything else is an error
    /// rather than a silent patch release.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(DevError::version(format!(
                "Unknown bump kind '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}
