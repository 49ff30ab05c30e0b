//! In-memory triple store with subject and type indexing.
//!
//! Triples live in a subject → predicate → object-set index, which makes
//! insertion idempotent and pattern lookups by `(subject, predicate)` cheap. A
//! reverse index from type to subjects answers "all rooms" style queries
//! without scanning.

use std::collections::{BTreeSet, HashMap};

use crate::resource::Resource;
use crate::vocab;

use super::{Term, Triple};

type PredicateMap = HashMap<Resource, BTreeSet<Term>>;

/// Deduplicated collection of triples for one build.
///
/// Owned by a single caller for the length of a request; there is no internal
/// locking.
pub struct TripleStore {
    /// subject → predicate → objects.
    spo: HashMap<Resource, PredicateMap>,
    /// Type resource → subjects asserted to be of that type.
    types: HashMap<Resource, BTreeSet<Resource>>,
    rdf_type: Resource,
    triple_count: usize,
}

impl TripleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            spo: HashMap::new(),
            types: HashMap::new(),
            rdf_type: vocab::rdf_type(),
            triple_count: 0,
        }
    }

    /// Insert a triple. Returns `false` if it was already present.
    pub fn add(&mut self, subject: Resource, predicate: Resource, object: impl Into<Term>) -> bool {
        let object = object.into();

        if predicate == self.rdf_type {
            if let Term::Resource(ty) = &object {
                self.types
                    .entry(ty.clone())
                    .or_default()
                    .insert(subject.clone());
            }
        }

        let inserted = self
            .spo
            .entry(subject)
            .or_default()
            .entry(predicate)
            .or_default()
            .insert(object);
        if inserted {
            self.triple_count += 1;
        }
        inserted
    }

    /// Replace every object of `(subject, predicate)` with `object`.
    ///
    /// Used for single-valued attributes: a later write wins.
    pub fn set(&mut self, subject: Resource, predicate: Resource, object: impl Into<Term>) {
        let removed = self
            .spo
            .get_mut(&subject)
            .and_then(|preds| preds.get_mut(&predicate))
            .map(std::mem::take)
            .unwrap_or_default();

        self.triple_count -= removed.len();
        if predicate == self.rdf_type {
            for ty in removed.iter().filter_map(Term::as_resource) {
                if let Some(subjects) = self.types.get_mut(ty) {
                    subjects.remove(&subject);
                }
            }
        }

        self.add(subject, predicate, object);
    }

    /// All subjects with a type-assertion triple to `ty`.
    pub fn subjects_of_type(&self, ty: &Resource) -> Vec<Resource> {
        self.types
            .get(ty)
            .map(|subjects| subjects.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All objects linked from `subject` via `predicate`.
    pub fn objects(&self, subject: &Resource, predicate: &Resource) -> Vec<&Term> {
        self.spo
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .map(|objects| objects.iter().collect())
            .unwrap_or_default()
    }

    /// One object of `(subject, predicate)`, for predicates that hold a single
    /// value. Which one is returned when several exist is unspecified.
    pub fn value_of(&self, subject: &Resource, predicate: &Resource) -> Option<&Term> {
        self.spo
            .get(subject)?
            .get(predicate)?
            .iter()
            .next()
    }

    /// Exact-triple membership.
    pub fn contains(&self, subject: &Resource, predicate: &Resource, object: &Term) -> bool {
        self.spo
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .is_some_and(|objects| objects.contains(object))
    }

    /// Number of triples.
    pub fn len(&self) -> usize {
        self.triple_count
    }

    pub fn is_empty(&self) -> bool {
        self.triple_count == 0
    }

    /// Every resource appearing in subject position, sorted.
    pub fn subjects(&self) -> Vec<&Resource> {
        let mut subjects: Vec<&Resource> = self
            .spo
            .iter()
            .filter(|(_, preds)| preds.values().any(|objs| !objs.is_empty()))
            .map(|(s, _)| s)
            .collect();
        subjects.sort();
        subjects
    }

    /// Predicates used from `subject` and their objects, sorted by predicate.
    pub fn predicates_of(&self, subject: &Resource) -> Vec<(&Resource, &BTreeSet<Term>)> {
        let mut preds: Vec<_> = self
            .spo
            .get(subject)
            .map(|preds| preds.iter().filter(|(_, objs)| !objs.is_empty()).collect())
            .unwrap_or_default();
        preds.sort_by(|a, b| a.0.cmp(b.0));
        preds
    }

    /// All triples, in canonical (subject, predicate, object) order.
    pub fn triples(&self) -> Vec<Triple> {
        let mut all: Vec<Triple> = self
            .spo
            .iter()
            .flat_map(|(s, preds)| {
                preds.iter().flat_map(move |(p, objects)| {
                    objects
                        .iter()
                        .map(move |o| Triple::new(s.clone(), p.clone(), o.clone()))
                })
            })
            .collect();
        all.sort();
        all
    }
}

impl Default for TripleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TripleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripleStore")
            .field("subjects", &self.spo.len())
            .field("triples", &self.len())
            .finish()
    }
}
