mod error;
pub use crate::error::Error;

mod range;
pub use crate::range::{has_crossing, TRange};

mod proj;
pub use crate::proj::{LiftProjectivizer, Projectivize};

mod oblique;
pub use crate::oblique::{ObliquenessTable, LIFTED_SCORE};

mod binarize;
pub use crate::binarize::{Binarizer, BinaryNode, BinaryTree, NodeId};

mod sexp;
pub use crate::sexp::SexpEmitter;

/// Marker appended to the relation of an edge that was reattached
/// during pseudo-projectivization.
pub const LIFT_MARKER: char = '*';

/// Returns `true` iff `relation` carries the lift marker.
pub fn is_lifted(relation: &str) -> bool {
    relation.ends_with(LIFT_MARKER)
}

/// Strip the lift marker from `relation`, if present.
pub fn strip_lift(relation: &str) -> &str {
    relation.trim_end_matches(LIFT_MARKER)
}

#[cfg(test)]
mod tests;
