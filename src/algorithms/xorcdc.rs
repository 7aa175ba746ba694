//
// Copyright (c) 2025 Nathan Fiedler
//

//! XorCDC: an experimental, non-rolling-hash variant included for
//! comparison only. Processes disjoint 64-byte windows rather than a
//! byte-at-a-time fingerprint, so its size distribution is bimodal near the
//! clamp bounds rather than concentrated around `NormalSize`.

use crate::algorithm::CutpointAlgorithm;
use crate::options::ChunkerOptions;

const WINDOW: usize = 64;
const XOR_CONST: u64 = 0x5555_5555;
const SET_BITS_THRESHOLD: u32 = 16;

#[derive(Debug, Default, Clone, Copy)]
pub struct XorCdc;

impl CutpointAlgorithm for XorCdc {
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

        // unlike FastCDC/JC/UltraCDC, this algorithm does not skip the
        // first MinSize bytes before scanning; it patches the result
        // afterward instead (see the MinSize check below)
        let mut i = 0;
        while i < n {
            let window_end = (i + WINDOW).min(n);
            if window_end - i < 8 {
                break;
            }
            let mut word_bytes = [0u8; 8];
            word_bytes.copy_from_slice(&data[i..i + 8]);
            let word = u64::from_be_bytes(word_bytes);
            let set_bits = (word ^ XOR_CONST).count_ones();
            if set_bits >= SET_BITS_THRESHOLD {
                // known, ad-hoc limitation: the resulting chunk is not
                // content-defined at this particular boundary; the check
                // is against this window's own width, not the absolute
                // chunk length, so it fires on almost every triggered cut
                if window_end - i < min && n - i >= min {
                    return i + min;
                }
                return window_end;
            }
            i += WINDOW;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_source_returns_whole() {
        let algo = XorCdc;
        let opts = ChunkerOptions::new(2048, 8192, 65536);
        let data = vec![0u8; 1024];
        assert_eq!(algo.cutpoint(&opts, &data), 1024);
    }

    #[test]
    fn test_never_exceeds_max() {
        let algo = XorCdc;
        let opts = ChunkerOptions::new(2048, 8192, 65536);
        let data = vec![0x55u8; 100_000];
        assert!(algo.cutpoint(&opts, &data) <= 65536);
    }

    #[test]
    fn test_min_size_patch_snaps_to_min_on_early_cut() {
        // the first 64-byte window of all-zero bytes XORed against the
        // pattern yields a constant word whose popcount trips the
        // threshold immediately; the window itself is only 64 bytes wide,
        // well under min_size, so the MinSize patch must snap the result
        // forward to min_size rather than returning the raw window end
        let algo = XorCdc;
        let opts = ChunkerOptions::new(2048, 8192, 65536);
        let data = vec![0u8; 100_000];
        assert_eq!(algo.cutpoint(&opts, &data), 2048);
    }

    #[test]
    fn test_requires_normal_size() {
        let algo = XorCdc;
        let opts = ChunkerOptions::without_normal_size(2048, 65536);
        assert!(algo.validate(&opts).is_err());
    }
}
