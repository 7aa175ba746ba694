//
// Copyright (c) 2025 Nathan Fiedler
//

//! Size constraints for a [`crate::Chunker`], shared by every algorithm.

use crate::error::{Error, OptionsField};

/// Smallest acceptable value for any size field.
pub const SIZE_MIN: u32 = 64;
/// Largest acceptable value for any size field.
pub const SIZE_MAX: u32 = 1 << 30;

/// When `normal_size` is omitted, an algorithm that does not need it
/// explicitly derives one this many bytes past `min_size`.
const DEFAULT_NORMAL_OFFSET: u32 = 8 * 1024;

///
/// Configuration for a [`crate::Chunker`]: the minimum, target ("normal"),
/// and maximum chunk sizes.
///
/// `normal_size` may be left unset for algorithms (such as UltraCDC) that
/// only use it as a hint; in that case it is derived as `min_size + 8 KiB`.
/// Algorithms that require it explicitly (FastCDC, JC, XorCDC) report
/// [`Error::InvalidOptions`] from [`ChunkerOptions::require_normal_size`]
/// when it is absent.
///
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ChunkerOptions {
    pub min_size: u32,
    pub normal_size: Option<u32>,
    pub max_size: u32,
}

impl ChunkerOptions {
    /// Construct options with an explicit normal size.
    pub fn new(min_size: u32, normal_size: u32, max_size: u32) -> Self {
        Self {
            min_size,
            normal_size: Some(normal_size),
            max_size,
        }
    }

    /// Construct options that let the algorithm derive its own normal size.
    pub fn without_normal_size(min_size: u32, max_size: u32) -> Self {
        Self {
            min_size,
            normal_size: None,
            max_size,
        }
    }

    /// The effective normal size: as supplied, or derived from `min_size`
    /// when absent.
    pub fn effective_normal_size(&self) -> u32 {
        self.normal_size
            .unwrap_or_else(|| self.min_size.saturating_add(DEFAULT_NORMAL_OFFSET))
    }

    /// Validate the universal size invariants (`64 <= MinSize < NormalSize
    /// < MaxSize <= 2^30`). Algorithms that require `normal_size` to be
    /// explicit call
    /// [`ChunkerOptions::require_normal_size`] first.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_size < SIZE_MIN || self.min_size > SIZE_MAX {
            return Err(Error::invalid(
                OptionsField::MinSize,
                format!(
                    "MinSize must satisfy {} <= MinSize <= {}, got {}",
                    SIZE_MIN, SIZE_MAX, self.min_size
                ),
            ));
        }
        if self.max_size < SIZE_MIN || self.max_size > SIZE_MAX {
            return Err(Error::invalid(
                OptionsField::MaxSize,
                format!(
                    "MaxSize must satisfy {} <= MaxSize <= {}, got {}",
                    SIZE_MIN, SIZE_MAX, self.max_size
                ),
            ));
        }
        let normal = self.effective_normal_size();
        if normal < SIZE_MIN || normal > SIZE_MAX {
            return Err(Error::invalid(
                OptionsField::NormalSize,
                format!(
                    "NormalSize must satisfy {} <= NormalSize <= {}, got {}",
                    SIZE_MIN, SIZE_MAX, normal
                ),
            ));
        }
        if self.min_size >= normal {
            return Err(Error::invalid(
                OptionsField::MinSize,
                format!(
                    "MinSize ({}) must be strictly less than NormalSize ({})",
                    self.min_size, normal
                ),
            ));
        }
        if normal >= self.max_size {
            return Err(Error::invalid(
                OptionsField::MaxSize,
                format!(
                    "MaxSize ({}) must be strictly greater than NormalSize ({})",
                    self.max_size, normal
                ),
            ));
        }
        Ok(())
    }

    /// Reject options whose `normal_size` was left unset. Called by
    /// algorithms that use `normal_size` as a hard cut boundary rather than
    /// a derivable hint.
    pub fn require_normal_size(&self) -> Result<(), Error> {
        if self.normal_size.is_none() {
            return Err(Error::invalid(
                OptionsField::NormalSize,
                "NormalSize is required for this algorithm",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_options() {
        let opts = ChunkerOptions::new(2048, 8192, 65536);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_min_too_small() {
        let opts = ChunkerOptions::new(32, 8192, 65536);
        match opts.validate() {
            Err(Error::InvalidOptions { field, .. }) => assert_eq!(field, OptionsField::MinSize),
            other => panic!("expected InvalidOptions(MinSize), got {other:?}"),
        }
    }

    #[test]
    fn test_min_not_less_than_normal() {
        let opts = ChunkerOptions::new(8192, 8192, 65536);
        match opts.validate() {
            Err(Error::InvalidOptions { field, .. }) => assert_eq!(field, OptionsField::MinSize),
            other => panic!("expected InvalidOptions(MinSize), got {other:?}"),
        }
    }

    #[test]
    fn test_normal_not_less_than_max() {
        let opts = ChunkerOptions::new(2048, 65536, 65536);
        match opts.validate() {
            Err(Error::InvalidOptions { field, .. }) => assert_eq!(field, OptionsField::MaxSize),
            other => panic!("expected InvalidOptions(MaxSize), got {other:?}"),
        }
    }

    #[test]
    fn test_max_too_large() {
        let opts = ChunkerOptions::new(2048, 8192, (1u64 << 31) as u32);
        match opts.validate() {
            Err(Error::InvalidOptions { field, .. }) => assert_eq!(field, OptionsField::MaxSize),
            other => panic!("expected InvalidOptions(MaxSize), got {other:?}"),
        }
    }

    #[test]
    fn test_derived_normal_size() {
        let opts = ChunkerOptions::without_normal_size(2048, 65536);
        assert_eq!(opts.effective_normal_size(), 2048 + 8192);
        assert!(opts.validate().is_ok());
        assert!(opts.require_normal_size().is_err());
    }
}
