//! Pseudo-projectivization of dependency trees.

use itertools::Itertools;
use udtree::graph::{DepTree, DepTriple};
use udtree::GraphError;

use crate::range::{crosses_any, TRange};
use crate::{Error, LIFT_MARKER};

/// Tree projectivizer.
pub trait Projectivize {
    /// Rewrite a non-projective tree into a projective tree.
    ///
    /// Depending on the projectivizer, this may add additional
    /// information to the dependency labels of rewritten arcs.
    fn projectivize(&self, tree: &mut DepTree) -> Result<(), Error>;
}

/// A projectivizer that lifts crossing arcs.
///
/// Arcs that cross a previously registered arc are reattached to the
/// closest ancestor whose arc no longer crosses, climbing towards the
/// root. The relation of a reattached arc is suffixed with the lift
/// marker so that later processing can recognize it; the node's
/// original head is expected to be captured in a
/// [`HeadMap`](udtree::graph::HeadMap) before this runs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LiftProjectivizer;

/// Traversal-local state of one projectivization run.
struct LiftContext {
    /// Arc intervals registered so far, in traversal order.
    ranges: Vec<TRange>,

    /// Nodes whose arc crossed an already registered arc, in discovery
    /// order.
    to_lift: Vec<usize>,
}

impl LiftProjectivizer {
    pub fn new() -> Self {
        LiftProjectivizer
    }

    /// Collect the nodes that must be lifted.
    ///
    /// All arcs to immediate children of `parent` are tested against
    /// the working set and registered before any child is descended
    /// into; lift decisions depend on this registration order.
    fn collect_lifts(&self, tree: &DepTree, parent: usize, ctx: &mut LiftContext) {
        let children: Vec<usize> = tree.dependents(parent).map(|t| t.dependent()).collect();

        for &child in &children {
            let range = TRange::from_edge(parent, child);

            if crosses_any(&range, &ctx.ranges) && !ctx.to_lift.contains(&child) {
                ctx.to_lift.push(child);
            }

            ctx.ranges.push(range);
        }

        for &child in &children {
            self.collect_lifts(tree, child, ctx);
        }
    }

    /// Reattach `node` to the closest non-crossing ancestor.
    ///
    /// The node's current interval is removed from the working set
    /// before the climb; candidate intervals are tested against the
    /// working set but never added to it. When no ancestor up to the
    /// real root is non-crossing, the root is accepted.
    fn lift(
        &self,
        tree: &mut DepTree,
        node: usize,
        root: usize,
        ranges: &mut Vec<TRange>,
    ) -> Result<(), Error> {
        let triple = tree.head(node).ok_or(GraphError::Headless { node })?;
        let parent = triple.head();
        let relation = triple.relation().to_owned();

        let old_range = TRange::from_edge(parent, node);
        if let Some((pos, _)) = ranges.iter().find_position(|r| **r == old_range) {
            ranges.remove(pos);
        }

        let mut candidate = parent;
        let mut steps = 0;
        let accepted = loop {
            if !crosses_any(&TRange::from_edge(candidate, node), ranges) {
                break candidate;
            }

            if candidate == root {
                break root;
            }

            candidate = tree
                .head(candidate)
                .ok_or(Error::LostRootPath { node })?
                .head();
            if candidate == 0 {
                break root;
            }

            steps += 1;
            if steps > tree.len() {
                return Err(Error::LostRootPath { node });
            }
        };

        if accepted != parent {
            tree.detach(node);
            tree.attach(DepTriple::new(
                accepted,
                format!("{}{}", relation, LIFT_MARKER),
                node,
            ))?;
        }

        Ok(())
    }
}

impl Projectivize for LiftProjectivizer {
    fn projectivize(&self, tree: &mut DepTree) -> Result<(), Error> {
        let root = tree.root()?;

        let mut ctx = LiftContext {
            ranges: Vec::new(),
            to_lift: Vec::new(),
        };
        self.collect_lifts(tree, root, &mut ctx);

        let LiftContext { mut ranges, to_lift } = ctx;

        // Deepest-discovered arcs are reattached first.
        for &node in to_lift.iter().rev() {
            self.lift(tree, node, root, &mut ranges)?;
        }

        Ok(())
    }
}
