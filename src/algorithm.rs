//
// Copyright (c) 2025 Nathan Fiedler
//

//! The pluggable cutpoint-algorithm interface.

use crate::error::Error;
use crate::options::ChunkerOptions;

///
/// A content-defined chunking algorithm: given up to `MaxSize` bytes of
/// buffered input, decides where the current chunk ends.
///
/// Implementations are expected to be stateless or near-stateless (JC caches
/// a jump length lazily) and `cutpoint` must be a pure function of its
/// arguments: the same `(options, data)` pair always yields the same cut
/// offset.
///
pub trait CutpointAlgorithm {
    /// Size constraints this algorithm uses when the caller supplies none.
    fn default_options(&self) -> ChunkerOptions;

    /// Reject an options value this algorithm cannot operate with, beyond
    /// the universal checks in [`ChunkerOptions::validate`].
    fn validate(&self, options: &ChunkerOptions) -> Result<(), Error> {
        options.validate()
    }

    ///
    /// Compute the cut offset for the window `data` (of length `n =
    /// data.len()`), given `options`. Must return `c` with `1 <= c <= n`,
    /// except when `n == 0`, in which case the framework never calls this
    /// method.
    ///
    fn cutpoint(&self, options: &ChunkerOptions, data: &[u8]) -> usize;
}
