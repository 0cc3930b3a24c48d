use pkgver_compare::{PatchOrder, vercmp, vercmp_with};
use serde::{Deserialize, Serialize};

/// A raw version string ordered by the repository comparison rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionString(pub String);

impl VersionString {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for VersionString {
    fn eq(&self, other: &VersionString) -> bool {
        matches!(vercmp(&self.0, &other.0), std::cmp::Ordering::Equal)
    }
}

impl Eq for VersionString {}

impl PartialOrd for VersionString {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionString {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        vercmp(&self.0, &other.0)
    }
}

impl From<String> for VersionString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VersionString {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::ops::Deref for VersionString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl std::fmt::Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A version together with the patch policy it is ranked under.
///
/// The policy is repository metadata, not part of the version value, so it
/// is skipped on (de)serialization and two versions that only differ in
/// policy serialize identically. Each side of a comparison brings its own
/// policy: a repository may flag "1.0p1" as an applied patch while another
/// treats the same string as a plain letter suffix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    raw: VersionString,
    #[serde(skip)]
    patch: PatchOrder,
}

impl Version {
    pub fn new(v: &str) -> Self {
        Self {
            raw: v.into(),
            patch: PatchOrder::default(),
        }
    }

    /// Rank this version's patch markers under the given policy.
    pub fn with_patch_order(mut self, patch: PatchOrder) -> Self {
        self.patch = patch;
        self
    }

    pub fn as_str(&self) -> &str {
        self.raw.as_str()
    }

    pub fn patch_order(&self) -> PatchOrder {
        self.patch
    }

    pub fn is_semver(&self) -> bool {
        semver::Version::parse(&self.raw).is_ok()
    }
}

impl From<VersionString> for Version {
    fn from(v: VersionString) -> Self {
        Version::new(v.as_str())
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Version::new(s)
    }
}

impl std::ops::Deref for Version {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Version) -> bool {
        matches!(self.cmp(other), std::cmp::Ordering::Equal)
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Version) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Version) -> std::cmp::Ordering {
        vercmp_with(&self.raw, self.patch, &other.raw, other.patch)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}
