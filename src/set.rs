use crate::elem::PairElem;
use std::collections::HashSet;
use thiserror::Error;

/// Error raised while constructing an element set strictly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetError {
    #[error("element {element} declared multiple times")]
    DuplicateElement { element: String },
}

/// Insertion-ordered set of pair elements.
///
/// Concrete members are deduplicated by their string; deferred members carry
/// no identity and are counted instead. Iteration over concrete members
/// follows the order of first insertion, which is the order used when
/// scanning for an unused value.
#[derive(Debug, Clone, Default)]
pub struct ElemSet {
    concrete: Vec<String>,
    seen: HashSet<String>,
    deferred: usize,
}

impl ElemSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set, rejecting duplicate concrete members.
    pub fn from_elems(
        elems: impl IntoIterator<Item = PairElem>,
    ) -> Result<Self, SetError> {
        let mut set = Self::new();
        for elem in elems {
            if let PairElem::Concrete(value) = &elem {
                if set.contains(value) {
                    return Err(SetError::DuplicateElement {
                        element: value.clone(),
                    });
                }
            }
            set.insert(elem);
        }
        Ok(set)
    }

    /// Adds a member; returns false when a concrete member collapsed into an
    /// earlier occurrence.
    pub fn insert(&mut self, elem: PairElem) -> bool {
        match elem {
            PairElem::Concrete(value) => {
                if self.seen.contains(&value) {
                    return false;
                }
                self.seen.insert(value.clone());
                self.concrete.push(value);
                true
            }
            PairElem::Deferred => {
                self.deferred += 1;
                true
            }
        }
    }

    /// True when the concrete member is present.
    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(value)
    }

    /// Concrete members in first-insertion order.
    pub fn concretes(&self) -> impl Iterator<Item = &str> + '_ {
        self.concrete.iter().map(String::as_str)
    }

    /// Number of concrete members.
    pub fn concrete_count(&self) -> usize {
        self.concrete.len()
    }

    /// Number of deferred members.
    pub fn deferred_count(&self) -> usize {
        self.deferred
    }

    /// Total membership, deferred members included.
    pub fn len(&self) -> usize {
        self.concrete.len() + self.deferred
    }

    /// True when the set has no members at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<PairElem> for ElemSet {
    fn from_iter<I: IntoIterator<Item = PairElem>>(iter: I) -> Self {
        let mut set = Self::new();
        for elem in iter {
            set.insert(elem);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for ElemSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(PairElem::from).collect()
    }
}
