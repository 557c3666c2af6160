use crate::elem::PairElem;
use crate::set::ElemSet;
use crate::stabilize::{stabilize, StableResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error raised when committing with inputs that are not fully resolved.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("cannot commit while {count} key(s) are still deferred")]
    UnresolvedKeys { count: usize },
    #[error("cannot commit while {count} value(s) are still deferred")]
    UnresolvedValues { count: usize },
}

/// Serialized table state persisted by the caller between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PairTableSnapshot {
    pub result: BTreeMap<String, String>,
}

/// Counters describing the table's activity.
#[derive(Debug, Clone, Default)]
pub struct PairTableTelemetry {
    pub plans_total: u64,
    pub deferred_plans_total: u64,
    pub commits_total: u64,
    pub carried_total: u64,
    pub reassigned_total: u64,
    pub dropped_total: u64,
}

/// Tracks the committed key/value mapping across invocations.
///
/// `plan` recomputes against the committed mapping without persisting, which
/// tolerates deferred inputs; `commit` requires every member to be resolved
/// and persists the recomputed mapping as the state the next invocation
/// stabilizes against. The caller owns durable storage via `snapshot` and
/// `from_snapshot`.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    committed: BTreeMap<String, String>,
    telemetry: PairTableTelemetry,
}

impl PairTable {
    /// Creates a table with no prior mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the table from externally persisted state.
    pub fn from_snapshot(snapshot: PairTableSnapshot) -> Self {
        Self {
            committed: snapshot.result,
            telemetry: PairTableTelemetry::default(),
        }
    }

    /// Serializes the committed mapping for the caller to persist.
    pub fn snapshot(&self) -> PairTableSnapshot {
        PairTableSnapshot {
            result: self.committed.clone(),
        }
    }

    /// Returns the committed mapping.
    pub fn result(&self) -> &BTreeMap<String, String> {
        &self.committed
    }

    /// Returns the activity counters.
    pub fn telemetry(&self) -> &PairTableTelemetry {
        &self.telemetry
    }

    /// Recomputes the mapping against the committed state without persisting.
    pub fn plan(&mut self, keys: &ElemSet, values: &ElemSet) -> StableResult {
        let result = stabilize(&self.committed, keys, values);
        self.telemetry.plans_total = self.telemetry.plans_total.saturating_add(1);
        if result.is_deferred() {
            self.telemetry.deferred_plans_total =
                self.telemetry.deferred_plans_total.saturating_add(1);
        }
        result
    }

    /// Recomputes and persists the mapping.
    ///
    /// Every key and value must be resolved by now; with fully concrete
    /// inputs the stabilizer always produces a fully concrete mapping.
    pub fn commit(
        &mut self,
        keys: &ElemSet,
        values: &ElemSet,
    ) -> Result<&BTreeMap<String, String>, TableError> {
        if keys.deferred_count() > 0 {
            return Err(TableError::UnresolvedKeys {
                count: keys.deferred_count(),
            });
        }
        if values.deferred_count() > 0 {
            return Err(TableError::UnresolvedValues {
                count: values.deferred_count(),
            });
        }

        let mut next = BTreeMap::new();
        if let StableResult::Resolved(mapping) = stabilize(&self.committed, keys, values) {
            for (key, value) in mapping {
                if let PairElem::Concrete(value) = value {
                    next.insert(key, value);
                }
            }
        }

        for (key, value) in &next {
            if self.committed.get(key) == Some(value) {
                self.telemetry.carried_total = self.telemetry.carried_total.saturating_add(1);
            } else {
                self.telemetry.reassigned_total =
                    self.telemetry.reassigned_total.saturating_add(1);
            }
        }
        let dropped = self
            .committed
            .keys()
            .filter(|key| !next.contains_key(*key))
            .count() as u64;
        self.telemetry.dropped_total = self.telemetry.dropped_total.saturating_add(dropped);
        self.telemetry.commits_total = self.telemetry.commits_total.saturating_add(1);

        self.committed = next;
        Ok(&self.committed)
    }
}
