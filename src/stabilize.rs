use crate::elem::PairElem;
use crate::set::ElemSet;
use std::collections::{BTreeMap, HashSet};

/// Outcome of one stabilization pass.
///
/// A resolved mapping may still contain deferred *values* (a key reserved a
/// value slot that is not yet known); only a deferred key with remaining
/// capacity forces the whole mapping into `Deferred`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StableResult {
    Resolved(BTreeMap<String, PairElem>),
    Deferred,
}

impl StableResult {
    /// True when the whole mapping is not yet knowable.
    pub fn is_deferred(&self) -> bool {
        matches!(self, StableResult::Deferred)
    }

    /// Returns the mapping, if resolved.
    pub fn as_resolved(&self) -> Option<&BTreeMap<String, PairElem>> {
        match self {
            StableResult::Resolved(mapping) => Some(mapping),
            StableResult::Deferred => None,
        }
    }
}

/// Recomputes the key/value mapping while keeping every still-valid prior
/// assignment unchanged.
///
/// Prior pairs survive iff both sides remain present in the current sets. A
/// pair whose key disappeared is dropped outright; a pair whose value
/// disappeared leaves its key to be reassigned like a new one. New or
/// orphaned keys take the first unused value in value-set order, falling back
/// to a deferred value slot when every concrete value is taken, and stay
/// unassigned when neither exists. The mapping size never exceeds the smaller
/// of the two set sizes.
pub fn stabilize(
    previous: &BTreeMap<String, String>,
    keys: &ElemSet,
    values: &ElemSet,
) -> StableResult {
    let mut mapping = BTreeMap::new();
    let mut used: HashSet<&str> = HashSet::new();
    let mut deferred_values = values.deferred_count();

    // Carry forward prior pairs whose key and value both survive. Anything
    // else is left out so the assignment loop below treats the key as new.
    for (key, value) in previous {
        if !keys.contains(key) || !values.contains(value) {
            continue;
        }
        mapping.insert(key.clone(), PairElem::Concrete(value.clone()));
        used.insert(value.as_str());
    }

    for key in keys.concretes() {
        if mapping.contains_key(key) {
            continue;
        }
        if let Some(value) = values.concretes().find(|value| !used.contains(*value)) {
            mapping.insert(key.to_string(), PairElem::Concrete(value.to_string()));
            used.insert(value);
        } else if deferred_values > 0 {
            // The key reserves one not-yet-known value slot.
            mapping.insert(key.to_string(), PairElem::Deferred);
            deferred_values -= 1;
        }
    }

    // A deferred key that could still claim a value (deferred or unused
    // concrete) may displace entries above once it resolves, so the mapping
    // as a whole cannot be reported yet.
    let unused_concrete = values.concrete_count() - used.len();
    if keys.deferred_count() > 0 && (deferred_values > 0 || unused_concrete > 0) {
        return StableResult::Deferred;
    }

    StableResult::Resolved(mapping)
}
