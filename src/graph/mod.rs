//! Fact graph: typed triples and the in-memory [`TripleStore`].
//!
//! The graph stores triples (subject, predicate, object) where subject and
//! predicate are [`Resource`]s and the object is a [`Term`]: either another
//! resource or a typed [`Literal`].

pub mod index;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

pub use index::TripleStore;

/// A typed scalar value.
///
/// Integer literals stay tagged, so `Integer(5)` and `String("5")` are
/// different objects and export differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Literal {
    String(String),
    Integer(i64),
}

impl Literal {
    /// The lexical form, without quotes or datatype.
    pub fn lexical(&self) -> String {
        match self {
            Literal::String(s) => s.clone(),
            Literal::Integer(i) => i.to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            Literal::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Literal::Integer(i) => Some(*i),
            Literal::String(_) => None,
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

impl From<i64> for Literal {
    fn from(i: i64) -> Self {
        Literal::Integer(i)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{s:?}"),
            Literal::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// The object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Term {
    Resource(Resource),
    Literal(Literal),
}

impl Term {
    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            Term::Resource(r) => Some(r),
            Term::Literal(_) => None,
        }
    }

    /// Plain-text form: the IRI of a resource, the lexical form of a literal.
    pub fn text(&self) -> String {
        match self {
            Term::Resource(r) => r.as_str().to_string(),
            Term::Literal(l) => l.lexical(),
        }
    }
}

impl From<Resource> for Term {
    fn from(r: Resource) -> Self {
        Term::Resource(r)
    }
}

impl From<&Resource> for Term {
    fn from(r: &Resource) -> Self {
        Term::Resource(r.clone())
    }
}

impl From<Literal> for Term {
    fn from(l: Literal) -> Self {
        Term::Literal(l)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Resource(r) => r.fmt(f),
            Term::Literal(l) => l.fmt(f),
        }
    }
}

/// A triple (subject, predicate, object) in the fact graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// The subject of the triple.
    pub subject: Resource,
    /// The predicate (relation) of the triple.
    pub predicate: Resource,
    /// The object of the triple.
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Resource, predicate: Resource, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_literals_differ() {
        assert_ne!(Literal::Integer(5), Literal::from("5"));
        assert_eq!(Literal::Integer(5).lexical(), Literal::from("5").lexical());
    }

    #[test]
    fn term_text() {
        let r = Resource::new("http://example.org/Kitchen").unwrap();
        assert_eq!(Term::from(&r).text(), "http://example.org/Kitchen");
        assert_eq!(Term::from(Literal::from("Kitchen")).text(), "Kitchen");
        assert_eq!(Term::from(Literal::Integer(-3)).text(), "-3");
    }

    #[test]
    fn literal_accessors() {
        assert_eq!(Literal::from("Light").as_str(), Some("Light"));
        assert_eq!(Literal::Integer(4).as_integer(), Some(4));
        assert_eq!(Literal::Integer(4).as_str(), None);
    }

    #[test]
    fn triple_display() {
        let s = Resource::new("urn:s").unwrap();
        let p = Resource::new("urn:p").unwrap();
        let t = Triple::new(s, p, Literal::Integer(7));
        assert_eq!(t.to_string(), "<urn:s> <urn:p> 7");
    }

    #[test]
    fn literal_serde_keeps_type_tag() {
        let json = serde_json::to_string(&Literal::Integer(3)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":3}"#);
    }
}
