/// The uniform interface shared by every successor-delete structure.
///
/// A structure maintains a subset of {0, …, n+1}. Elements 0 and n+1 are
/// sentinels: always present, never deletable. `successor` is total
/// because n+1 can never be removed.
pub trait SuccessorSet {
    /// Reset to the full set {0, …, n+1}, destroying all prior state.
    ///
    /// `n` must be at least 2 and at most the capacity the structure was
    /// allocated for.
    fn init(&mut self, n: usize);

    /// Remove element `i`, for 1 ≤ i ≤ n.
    ///
    /// Deleting an element that is already absent is a structural no-op
    /// for every implementation except the plain forward array, where it
    /// rewrites a stale pointer: answers stay correct, but compression
    /// work done on the chain through `i` is discarded.
    fn delete(&mut self, i: usize);

    /// Return the smallest present element ≥ `i`, for 0 ≤ i ≤ n+1.
    ///
    /// Takes `&mut self`: compressing strategies rewrite pointers on
    /// every query.
    fn successor(&mut self, i: usize) -> usize;
}

/// A recorded operation against a successor-delete structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    Delete(usize),
    Successor(usize),
}
