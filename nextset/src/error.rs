use thiserror::Error;

/// Invariant violations reported by the forest validator.
///
/// Detection means structural corruption; there is no repair path. Abort
/// the run that produced it.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("node {node}: parent {parent} outside [{node}, {len})")]
    ParentRange {
        node: usize,
        parent: usize,
        len: usize,
    },

    #[error("node {node}: height {height} but child pointer is {child}")]
    ChildPointer {
        node: usize,
        child: usize,
        height: usize,
    },

    #[error("node {node}: stored height {stored} but children give {computed}")]
    HeightMismatch {
        node: usize,
        stored: usize,
        computed: usize,
    },

    #[error("node {node}: sibling list broken (left {left}, right {right})")]
    SiblingList {
        node: usize,
        left: usize,
        right: usize,
    },

    #[error("node {node}: height-class list broken (prev {prev}, next {next})")]
    HeightList {
        node: usize,
        prev: usize,
        next: usize,
    },

    #[error("height class {height}: no representative but max height is {max_height}")]
    EmptyClass { height: usize, max_height: usize },

    #[error("height class {height}: member {node} has height {actual}")]
    ClassHeight {
        height: usize,
        node: usize,
        actual: usize,
    },

    #[error("height classes cover {found} nodes, expected {expected}")]
    ClassCoverage { found: usize, expected: usize },

    #[error("child-list membership out of balance by {balance}")]
    ChildCoverage { balance: isize },
}
