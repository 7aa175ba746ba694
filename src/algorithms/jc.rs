//
// Copyright (c) 2025 Nathan Fiedler
//

//! JC: a gear-hash variant that jumps ahead past near-misses.

use std::cell::Cell;

use crate::algorithm::CutpointAlgorithm;
use crate::options::ChunkerOptions;
use crate::tables::GEAR;

/// Near-miss predicate: a fingerprint satisfying this is a candidate that
/// may still fail the stricter `MASK_C` test.
const MASK_J: u64 = 0x0000_5900_0356_0000;
/// Strict cut mask; a superset of `MASK_J`'s bits.
const MASK_C: u64 = 0x0000_5900_0357_0000;

/// Computes and caches the jump length on first use, since it depends only
/// on `NormalSize` and every call within one `Chunker` pass uses the same
/// options.
#[derive(Debug, Default)]
pub struct Jc {
    jump_length: Cell<Option<usize>>,
}

fn jump_length(normal_size: u32) -> usize {
    let c = (normal_size as f64).log2().floor() as i64 - 1;
    let j = c - 1;
    let numerator = (1i64 << j) * c;
    let denominator = (1i64 << c) - (1i64 << j);
    (numerator / denominator) as usize
}

impl CutpointAlgorithm for Jc {
    fn default_options(&self) -> ChunkerOptions {
        ChunkerOptions::new(2 * 1024, 8 * 1024, 64 * 1024)
    }

    fn validate(&self, options: &ChunkerOptions) -> Result<(), crate::error::Error> {
        options.require_normal_size()?;
        options.validate()
    }

    fn cutpoint(&self, options: &ChunkerOptions, data: &[u8]) -> usize {
        let n = data.len();
        let min = options.min_size as usize;
        if n <= min {
            return n;
        }
        let max = options.max_size as usize;
        let n = n.min(max);

        let j = match self.jump_length.get() {
            Some(j) => j,
            None => {
                let j = jump_length(options.effective_normal_size());
                self.jump_length.set(Some(j));
                j
            }
        };

        let mut fp: u64 = 0;
        let mut i = min;
        while i < n {
            fp = (fp << 1).wrapping_add(GEAR[data[i] as usize]);
            if fp & MASK_J == 0 {
                if fp & MASK_C == 0 {
                    return i;
                }
                fp = 0;
                i += j;
            }
            // applies unconditionally, even immediately after a jump
            i += 1;
        }
        if i > n {
            i = n;
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_length_matches_known_value() {
        // NormalSize = 8192 = 2^13, c = 12, j = 11
        // J = ((1<<11) * 12) / ((1<<12) - (1<<11)) = (2048*12)/2048 = 12
        assert_eq!(jump_length(8192), 12);
    }

    #[test]
    fn test_short_source_returns_whole() {
        let algo = Jc::default();
        let opts = ChunkerOptions::new(2048, 8192, 65536);
        let data = vec![0u8; 1024];
        assert_eq!(algo.cutpoint(&opts, &data), 1024);
    }

    #[test]
    fn test_cache_is_stable_across_calls() {
        let algo = Jc::default();
        let opts = ChunkerOptions::new(2048, 8192, 65536);
        let data = vec![0xabu8; 65536];
        let first = algo.cutpoint(&opts, &data);
        let second = algo.cutpoint(&opts, &data);
        assert_eq!(first, second);
    }

    #[test]
    fn test_requires_normal_size() {
        let algo = Jc::default();
        let opts = ChunkerOptions::without_normal_size(2048, 65536);
        assert!(algo.validate(&opts).is_err());
    }
}
