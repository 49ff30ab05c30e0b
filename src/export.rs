//! Canonical text export of a [`TripleStore`].
//!
//! Two formats are supported:
//! - **Turtle** ([`to_turtle`]): grouped by subject, with `ns1:`, `rdf:` and
//!   `xsd:` prefixes; the format returned to clients as `rawRDF`
//! - **N-Triples** ([`to_ntriples`]): one triple per line, absolute IRIs
//!
//! Output is deterministic: subjects, predicates and objects are always
//! written in sorted order, so two stores holding the same triples export to
//! identical text regardless of insertion order.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::graph::{Literal, Term, TripleStore};
use crate::resource::{Namespace, Resource};
use crate::vocab::{RDF_NS, RDF_TYPE, Vocabulary, XSD_INTEGER, XSD_NS};

/// Prefix label used for the graph's own namespace.
pub const NS_PREFIX: &str = "ns1";

/// Text format for [`serialize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Turtle,
    NTriples,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(Self::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(Self::NTriples),
            other => Err(format!(
                "unknown export format \"{other}\" (expected turtle or ntriples)"
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Turtle => write!(f, "turtle"),
            Self::NTriples => write!(f, "ntriples"),
        }
    }
}

/// Serialize every triple in `store`.
#[must_use]
pub fn serialize(store: &TripleStore, vocab: &Vocabulary, format: ExportFormat) -> String {
    match format {
        ExportFormat::Turtle => to_turtle(store, &vocab.ns),
        ExportFormat::NTriples => to_ntriples(store),
    }
}

/// Serialize to Turtle, abbreviating IRIs under `ns` as `ns1:local`.
#[must_use]
pub fn to_turtle(store: &TripleStore, ns: &Namespace) -> String {
    let mut out = String::with_capacity(64 * store.len() + 256);

    out.push_str(&format!("@prefix {NS_PREFIX}: <{}> .\n", escape_iri(ns.as_str())));
    out.push_str(&format!("@prefix rdf: <{RDF_NS}> .\n"));
    out.push_str(&format!("@prefix xsd: <{XSD_NS}> .\n"));

    for subject in store.subjects() {
        let mut preds = store.predicates_of(subject);
        // `a` first, the rest stays sorted.
        preds.sort_by_key(|(p, _)| p.as_str() != RDF_TYPE);

        out.push('\n');
        out.push_str(&turtle_resource(subject, ns));

        for (i, (predicate, objects)) in preds.iter().enumerate() {
            out.push_str(if i == 0 { " " } else { " ;\n    " });
            if predicate.as_str() == RDF_TYPE {
                out.push('a');
            } else {
                out.push_str(&turtle_resource(predicate, ns));
            }
            out.push(' ');
            let rendered: Vec<String> = objects.iter().map(|o| turtle_term(o, ns)).collect();
            out.push_str(&rendered.join(" , "));
        }
        out.push_str(" .\n");
    }

    out
}

/// Serialize to N-Triples.
#[must_use]
pub fn to_ntriples(store: &TripleStore) -> String {
    let mut out = String::with_capacity(96 * store.len());
    for t in store.triples() {
        out.push_str(&format!(
            "<{}> <{}> {} .\n",
            escape_iri(t.subject.as_str()),
            escape_iri(t.predicate.as_str()),
            ntriples_term(&t.object)
        ));
    }
    out
}

fn turtle_resource(r: &Resource, ns: &Namespace) -> String {
    if let Some(local) = r.local_name(ns).filter(|l| is_plain_local(l)) {
        return format!("{NS_PREFIX}:{local}");
    }
    if let Some(local) = r.as_str().strip_prefix(RDF_NS).filter(|l| is_plain_local(l)) {
        return format!("rdf:{local}");
    }
    format!("<{}>", escape_iri(r.as_str()))
}

fn turtle_term(term: &Term, ns: &Namespace) -> String {
    match term {
        Term::Resource(r) => turtle_resource(r, ns),
        Term::Literal(Literal::String(s)) => quote(s),
        Term::Literal(Literal::Integer(i)) => format!("\"{i}\"^^xsd:integer"),
    }
}

fn ntriples_term(term: &Term) -> String {
    match term {
        Term::Resource(r) => format!("<{}>", escape_iri(r.as_str())),
        Term::Literal(Literal::String(s)) => quote(s),
        Term::Literal(Literal::Integer(i)) => format!("\"{i}\"^^<{XSD_INTEGER}>"),
    }
}

/// Local names safe to write after a prefix without escaping.
fn is_plain_local(local: &str) -> bool {
    let mut chars = local.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape characters not allowed inside `<...>` as `\uXXXX`.
fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        if c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\') {
            out.push_str(&format!("\\u{:04X}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}
