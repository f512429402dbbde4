//! The origin tree: where a table was loaded from, or how it was derived.

use std::sync::Arc;

use crate::sheet::LocationBlock;

/// The source of one table.
///
/// A node is either a leaf, backed by exactly one loaded input location,
/// or a branch recording a named operation over one or more parent trees.
/// The enum makes the "both or neither" state unrepresentable; the
/// non-empty parent rule is enforced by [`TableOrigin::derived`].
///
/// Nodes are immutable after construction and shared via [`Arc`] from
/// every table that lists them as an ancestor. An origin stays valid even
/// if the source file is later deleted or modified: identifier strings are
/// captured at load time.
#[derive(Debug, Clone)]
pub enum TableOrigin {
    /// A loaded input.
    Leaf(LocationBlock),
    /// A derived table.
    Branch(OriginBranch),
}

/// The branch payload: an operation name and the ordered parents it
/// combined. Fields are private so a branch with no parents cannot be
/// built outside [`TableOrigin::derived`].
#[derive(Debug, Clone)]
pub struct OriginBranch {
    operation: String,
    parents: Vec<Arc<TableOrigin>>,
}

impl OriginBranch {
    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn parents(&self) -> &[Arc<TableOrigin>] {
        &self.parents
    }
}

impl TableOrigin {
    /// An origin for a loaded input table.
    pub fn leaf(input_location: LocationBlock) -> Self {
        Self::Leaf(input_location)
    }

    /// An origin for a table derived from `parents` via `operation`.
    ///
    /// # Panics
    ///
    /// Panics if `parents` is empty. A derivation with no inputs is a
    /// programmer error, not a runtime input error.
    pub fn derived(operation: impl Into<String>, parents: Vec<Arc<TableOrigin>>) -> Self {
        assert!(
            !parents.is_empty(),
            "a derived table origin requires at least one parent"
        );
        Self::Branch(OriginBranch {
            operation: operation.into(),
            parents,
        })
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// The input location of a leaf, `None` for a branch.
    pub fn input_location(&self) -> Option<&LocationBlock> {
        match self {
            Self::Leaf(location) => Some(location),
            Self::Branch(_) => None,
        }
    }

    /// The operation name of a branch, `None` for a leaf.
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(branch) => Some(branch.operation()),
        }
    }

    /// The parents of a branch, empty for a leaf.
    pub fn parents(&self) -> &[Arc<TableOrigin>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Branch(branch) => branch.parents(),
        }
    }

    /// The input locations of all non-derived ancestors, depth-first in
    /// parent-list order.
    ///
    /// Every call returns a fresh traversal; no deduplication is applied,
    /// so a location reachable via two parents is yielded twice.
    pub fn input_ancestors(&self) -> InputAncestors<'_> {
        InputAncestors { stack: vec![self] }
    }
}

/// Iterator over the leaf locations of an origin tree. See
/// [`TableOrigin::input_ancestors`].
#[derive(Debug)]
pub struct InputAncestors<'a> {
    stack: Vec<&'a TableOrigin>,
}

impl<'a> Iterator for InputAncestors<'a> {
    type Item = &'a LocationBlock;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                TableOrigin::Leaf(location) => return Some(location),
                TableOrigin::Branch(branch) => {
                    // Reversed so the first parent is traversed first.
                    self.stack
                        .extend(branch.parents().iter().rev().map(Arc::as_ref));
                }
            }
        }
        None
    }
}
