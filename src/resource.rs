//! Resource identifiers and the namespace-based namer.
//!
//! A [`Resource`] is an absolute IRI naming a room, appliance, person, class or
//! predicate. Resources for user-supplied names are minted by
//! [`Namespace::resource`], which replaces spaces with underscores so that
//! `"Living Room"` and `"Living_Room"` name the same thing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Result type for resource construction.
pub type ResourceResult<T> = std::result::Result<T, GraphError>;

/// An absolute, non-empty IRI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resource(String);

impl Resource {
    /// Wrap an IRI.
    ///
    /// Fails with [`GraphError::InvalidArgument`] if `iri` is empty.
    pub fn new(iri: impl Into<String>) -> ResourceResult<Self> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(GraphError::InvalidArgument {
                what: "resource IRI",
            });
        }
        Ok(Self(iri))
    }

    /// Wrap a compile-time IRI constant.
    pub(crate) fn known(iri: &'static str) -> Self {
        debug_assert!(!iri.is_empty());
        Self(iri.to_string())
    }

    /// The full IRI.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after `ns`, if this resource lives under it.
    pub fn local_name<'a>(&'a self, ns: &Namespace) -> Option<&'a str> {
        self.0.strip_prefix(ns.as_str())
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl TryFrom<String> for Resource {
    type Error = GraphError;

    fn try_from(value: String) -> ResourceResult<Self> {
        Self::new(value)
    }
}

impl From<Resource> for String {
    fn from(r: Resource) -> Self {
        r.0
    }
}

/// An IRI prefix under which names are minted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    /// Default namespace for generated graphs.
    pub const DEFAULT_IRI: &'static str = "http://example.org/";

    /// Create a namespace from its IRI prefix.
    ///
    /// Fails with [`GraphError::InvalidArgument`] if `iri` is empty.
    pub fn new(iri: impl Into<String>) -> ResourceResult<Self> {
        let iri = iri.into();
        if iri.is_empty() {
            return Err(GraphError::InvalidArgument {
                what: "namespace IRI",
            });
        }
        Ok(Self(iri))
    }

    /// The IRI prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mint the resource for a human-readable name.
    ///
    /// Every space becomes an underscore; nothing else is rewritten. Names that
    /// differ only in spaces vs underscores alias to the same resource.
    pub fn resource(&self, raw_name: &str) -> Resource {
        let mut iri = String::with_capacity(self.0.len() + raw_name.len());
        iri.push_str(&self.0);
        iri.push_str(&normalize(raw_name));
        // Non-empty because the namespace is.
        Resource(iri)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self(Self::DEFAULT_IRI.to_string())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace every space with an underscore.
pub fn normalize(raw_name: &str) -> String {
    raw_name.replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_is_stable() {
        let ns = Namespace::default();
        assert_eq!(ns.resource("Living Room"), ns.resource("Living Room"));
    }

    #[test]
    fn spaces_alias_underscores() {
        let ns = Namespace::default();
        assert_eq!(ns.resource("Living Room"), ns.resource("Living_Room"));
        assert_eq!(
            ns.resource("Living Room").as_str(),
            "http://example.org/Living_Room"
        );
    }

    #[test]
    fn only_spaces_are_rewritten() {
        let ns = Namespace::default();
        assert_eq!(ns.resource("a\tb").as_str(), "http://example.org/a\tb");
        assert_ne!(ns.resource("Kitchen"), ns.resource("kitchen"));
    }

    #[test]
    fn empty_name_is_accepted() {
        let ns = Namespace::default();
        assert_eq!(ns.resource("").as_str(), "http://example.org/");
    }

    #[test]
    fn empty_iris_are_rejected() {
        assert_eq!(
            Resource::new(""),
            Err(GraphError::InvalidArgument {
                what: "resource IRI"
            })
        );
        assert!(Namespace::new("").is_err());
    }

    #[test]
    fn local_name_strips_namespace() {
        let ns = Namespace::new("urn:home:").unwrap();
        let r = ns.resource("Guest Room");
        assert_eq!(r.local_name(&ns), Some("Guest_Room"));
        assert_eq!(r.local_name(&Namespace::default()), None);
    }

    #[test]
    fn resource_serde_rejects_empty() {
        let ok: Resource = serde_json::from_str("\"http://example.org/x\"").unwrap();
        assert_eq!(ok.as_str(), "http://example.org/x");
        assert!(serde_json::from_str::<Resource>("\"\"").is_err());
    }

    #[test]
    fn display_wraps_in_angle_brackets() {
        let r = Resource::new("http://example.org/Room").unwrap();
        assert_eq!(r.to_string(), "<http://example.org/Room>");
    }
}
