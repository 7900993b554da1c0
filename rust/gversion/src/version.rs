//! The semantic version value type.

use crate::math::u8_width;
use crate::parse::{parse, ParseError, BUILD_DIVIDER, LEADER, PRE_DIVIDER, SEG_DIVIDER};
use std::fmt;
use std::str::FromStr;

/// A semantic version.
///
/// Versions compare through [`equivalent`](Version::equivalent),
/// [`equal`](Version::equal), [`is_after`](Version::is_after) and
/// [`is_before`](Version::is_before). There is no `Ord` impl: the
/// after/before checks are not a total order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Version {
    /// Major version number (X in X.Y.Z)
    pub major: u8,
    /// Minor version number (Y in X.Y.Z)
    pub minor: u8,
    /// Patch version number (Z in X.Y.Z)
    pub patch: u8,
    /// Pre-release identifiers (e.g., ["alpha", "1"] in 1.0.0-alpha.1)
    pub prerelease: Vec<String>,
    /// Build metadata (e.g., ["build", "123"] in 1.0.0+build.123)
    pub build: Vec<String>,
}

impl Version {
    /// Create a new version with the given major, minor, and patch numbers.
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Replace the pre-release identifiers.
    pub fn with_prerelease<I, S>(mut self, prerelease: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerelease = prerelease.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the build metadata.
    pub fn with_build<I, S>(mut self, build: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build = build.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_prerelease(&self) -> bool {
        !self.prerelease.is_empty()
    }

    pub fn has_build(&self) -> bool {
        !self.build.is_empty()
    }

    /// Same major, minor, patch and pre-release identifiers. Build metadata is
    /// ignored.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.prerelease == other.prerelease
    }

    /// [`equivalent`](Version::equivalent), and both sides carry the same
    /// number of build identifiers. Build contents are not compared.
    pub fn equal(&self, other: &Self) -> bool {
        self.equivalent(other) && self.build.len() == other.build.len()
    }

    /// Whether this version comes after `other`.
    ///
    /// Any of major, minor or patch being greater is enough on its own; the
    /// fields are not compared lexicographically. Failing that, a release is
    /// after a pre-release.
    pub fn is_after(&self, other: &Self) -> bool {
        if self.major > other.major || self.minor > other.minor || self.patch > other.patch {
            return true;
        }
        !self.is_prerelease() && other.is_prerelease()
    }

    /// Mirror of [`is_after`](Version::is_after): `a.is_before(b) == b.is_after(a)`.
    pub fn is_before(&self, other: &Self) -> bool {
        if self.major < other.major || self.minor < other.minor || self.patch < other.patch {
            return true;
        }
        !other.is_prerelease() && self.is_prerelease()
    }

    /// Renders `MAJOR.MINOR.PATCH[-PRE][+BUILD]`.
    pub fn string(&self) -> String {
        let mut out = String::with_capacity(self.rendered_len());
        self.fill(&mut out);
        out
    }

    /// Renders the same text as [`string`](Version::string) behind a leading `v`.
    pub fn vstring(&self) -> String {
        let mut out = String::with_capacity(self.rendered_len() + 1);
        out.push(char::from(LEADER));
        self.fill(&mut out);
        out
    }

    /// Exact byte length of [`string`](Version::string).
    pub fn rendered_len(&self) -> usize {
        u8_width(self.major)
            + u8_width(self.minor)
            + u8_width(self.patch)
            + 2
            + tag_len(&self.prerelease)
            + tag_len(&self.build)
    }

    fn fill(&self, out: &mut String) {
        push_u8(out, self.major);
        out.push(char::from(SEG_DIVIDER));
        push_u8(out, self.minor);
        out.push(char::from(SEG_DIVIDER));
        push_u8(out, self.patch);
        push_tag(out, PRE_DIVIDER, &self.prerelease);
        push_tag(out, BUILD_DIVIDER, &self.build);
    }
}

/// Length of `<divider>id.id...`, or zero for no identifiers.
fn tag_len(identifiers: &[String]) -> usize {
    if identifiers.is_empty() {
        return 0;
    }
    // One divider up front plus one dot between each pair.
    identifiers.iter().map(String::len).sum::<usize>() + identifiers.len()
}

fn push_tag(out: &mut String, divider: u8, identifiers: &[String]) {
    for (i, id) in identifiers.iter().enumerate() {
        out.push(char::from(if i == 0 { divider } else { SEG_DIVIDER }));
        out.push_str(id);
    }
}

fn push_u8(out: &mut String, n: u8) {
    if n >= 100 {
        out.push(char::from(b'0' + n / 100));
    }
    if n >= 10 {
        out.push(char::from(b'0' + n / 10 % 10));
    }
    out.push(char::from(b'0' + n % 10));
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_renders_zero() {
        assert_eq!(Version::default().string(), "0.0.0");
        assert_eq!(Version::default().vstring(), "v0.0.0");
    }

    #[test]
    fn test_rendered_len_is_exact() {
        let cases = [
            Version::default(),
            Version::new(255, 10, 9),
            Version::new(1, 2, 3).with_prerelease(["alpha"]),
            Version::new(1, 2, 3).with_build(["b1", "b2"]),
            Version::new(100, 0, 99)
                .with_prerelease(["rc", "1"])
                .with_build(["2020-09-18", "sha"]),
        ];
        for v in cases {
            let s = v.string();
            assert_eq!(s.len(), v.rendered_len(), "{}", s);
            assert_eq!(s.capacity(), v.rendered_len(), "{}", s);
            assert_eq!(v.vstring().len(), v.rendered_len() + 1);
        }
    }

    #[test]
    fn test_push_u8_all_widths() {
        for n in [0u8, 5, 10, 42, 99, 100, 101, 199, 255] {
            let mut out = String::new();
            push_u8(&mut out, n);
            assert_eq!(out, n.to_string());
        }
    }

    #[test]
    fn test_tag_len() {
        assert_eq!(tag_len(&[]), 0);
        assert_eq!(tag_len(&["alpha".to_string()]), 6);
        assert_eq!(tag_len(&["alpha".to_string(), "v1".to_string()]), 9);
    }

    #[test]
    fn test_display_matches_string() {
        let v = Version::new(1, 23, 0).with_prerelease(["alpha"]).with_build(["b58"]);
        assert_eq!(v.to_string(), "1.23.0-alpha+b58");
        assert_eq!(format!("{}", v), v.string());
    }

    #[test]
    fn test_from_str() {
        let v: Version = "v1.23.0-alpha+b58".parse().unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 23);
        assert_eq!(v.patch, 0);
        assert_eq!(v.prerelease, vec!["alpha"]);
        assert_eq!(v.build, vec!["b58"]);
    }

    #[test]
    fn test_builders() {
        let v = Version::new(1, 0, 0);
        assert!(!v.is_prerelease());
        assert!(!v.has_build());

        let v = v.with_prerelease(["beta"]).with_build(vec!["7".to_string()]);
        assert!(v.is_prerelease());
        assert!(v.has_build());
    }

    #[test]
    fn test_is_before_mirrors_is_after() {
        let a = Version::new(1, 10, 2);
        let b = Version::new(1, 10, 2).with_prerelease(["24"]);
        assert!(a.is_after(&b));
        assert!(b.is_before(&a));
        assert!(!a.is_before(&b));
        assert!(!b.is_after(&a));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let v = Version::new(1, 2, 3).with_prerelease(["rc", "1"]).with_build(["abc"]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#""1.2.3-rc.1+abc""#);

        let back: Version = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        let with_leader: Version = serde_json::from_str(r#""v1.2.3""#).unwrap();
        assert_eq!(with_leader, Version::new(1, 2, 3));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_malformed() {
        let err = serde_json::from_str::<Version>(r#""v1.0.0.1""#).unwrap_err();
        assert!(err.to_string().contains("code 1"));
    }
}
