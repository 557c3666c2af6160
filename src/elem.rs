use std::fmt;

/// Member of a key or value set: either a fully known string or a
/// placeholder for a string that will only be known later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairElem {
    Concrete(String),
    Deferred,
}

impl PairElem {
    /// Returns the concrete string, if known.
    pub fn as_concrete(&self) -> Option<&str> {
        match self {
            PairElem::Concrete(value) => Some(value),
            PairElem::Deferred => None,
        }
    }

    /// True when the member is still a placeholder.
    pub fn is_deferred(&self) -> bool {
        matches!(self, PairElem::Deferred)
    }
}

impl From<&str> for PairElem {
    fn from(value: &str) -> Self {
        PairElem::Concrete(value.to_string())
    }
}

impl From<String> for PairElem {
    fn from(value: String) -> Self {
        PairElem::Concrete(value)
    }
}

impl fmt::Display for PairElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairElem::Concrete(value) => f.write_str(value),
            PairElem::Deferred => f.write_str("<deferred>"),
        }
    }
}
