//! Stable key/value pairing engine: recomputes a mapping between two sets
//! while keeping every still-valid prior assignment unchanged.

pub mod elem;
pub mod set;
pub mod stabilize;
pub mod table;

pub use elem::PairElem;
pub use set::{ElemSet, SetError};
pub use stabilize::{stabilize, StableResult};
pub use table::{PairTable, PairTableSnapshot, PairTableTelemetry, TableError};
