//
// Copyright (c) 2025 Nathan Fiedler
//

//! FastCDC: cutpoint via a gear rolling hash with a two-mask normalization.

use crate::algorithm::CutpointAlgorithm;
use crate::options::ChunkerOptions;
use crate::tables::GEAR;

/// Strict mask, applied before the normal-size boundary.
const MASK_S: u64 = 0x0003_5907_0353_0000;
/// Lax mask, applied from the normal-size boundary onward.
const MASK_L: u64 = 0x0000_d900_0353_0000;

#[derive(Debug, Default, Clone, Copy)]
pub struct FastCdc;

impl CutpointAlgorithm for FastCdc {
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
        let normal = options.effective_normal_size() as usize;
        let n = n.min(max);
        let local_normal = if n <= normal { n } else { normal };

        let mut fp: u64 = 0;
        let mut mask = MASK_S;
        let mut i = min;
        while i < n {
            if i == local_normal {
                mask = MASK_L;
            }
            fp = (fp << 1).wrapping_add(GEAR[data[i] as usize]);
            if fp & mask == 0 {
                return i;
            }
            i += 1;
        }
        n
    }
}
