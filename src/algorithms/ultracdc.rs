//
// Copyright (c) 2025 Nathan Fiedler
//

//! UltraCDC: cutpoint via an 8-byte-window running Hamming-distance scan.
//!
//! Word reads are little-endian by fixed convention (see module docs on
//! `src/lib.rs`); the reference implementation reinterprets raw host memory,
//! which is not portable. Fixing the byte order here trades bit-identical
//! parity with a specific host architecture for reproducible,
//! architecture-independent cut offsets.

use crate::algorithm::CutpointAlgorithm;
use crate::options::ChunkerOptions;
use crate::tables::HAMMING;

const PATTERN: u64 = 0xAAAA_AAAA_AAAA_AAAA;
const MASK_S: u8 = 0x2F;
const MASK_L: u8 = 0x2C;
/// Threshold run length of identical windows that forces an early cut
/// inside a "low-entropy string".
const LEST: u32 = 64;

#[derive(Debug, Default, Clone, Copy)]
pub struct UltraCdc;

#[inline]
fn read_word(data: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[at..at + 8]);
    u64::from_le_bytes(bytes)
}

impl CutpointAlgorithm for UltraCdc {
    fn default_options(&self) -> ChunkerOptions {
        ChunkerOptions::without_normal_size(2 * 1024, 64 * 1024)
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

        let mut i = min;
        // the window only grows in whole 8-byte steps; a tail shorter than
        // that has no room for another word, so there is nothing to scan
        if i + 8 > n {
            return n;
        }
        let mut out_word = read_word(data, i);
        let mut dist = (out_word ^ PATTERN).count_ones() as u8;
        i += 8;
        let mut cnt: u32 = 0;
        let mut mask = MASK_S;

        while i < n {
            if i + 8 > n {
                break;
            }
            if i == local_normal {
                mask = MASK_L;
            }
            let in_word = read_word(data, i);
            if in_word == out_word {
                cnt += 1;
                if cnt == LEST {
                    return i + 8;
                }
                i += 8;
                continue;
            }
            cnt = 0;
            let out_bytes = out_word.to_le_bytes();
            let in_bytes = in_word.to_le_bytes();
            for j in 0..8 {
                if dist & mask == 0 {
                    return i + 8;
                }
                dist = dist.wrapping_add(HAMMING[out_bytes[j] as usize][in_bytes[j] as usize]);
            }
            out_word = in_word;
            i += 8;
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_source_returns_whole() {
        let algo = UltraCdc;
        let opts = ChunkerOptions::without_normal_size(2048, 65536);
        let data = vec![0u8; 1024];
        assert_eq!(algo.cutpoint(&opts, &data), 1024);
    }

    #[test]
    fn test_all_zeros_cuts_via_lest_shortcut() {
        let algo = UltraCdc;
        let opts = ChunkerOptions::without_normal_size(2048, 65536);
        let data = vec![0u8; 65536];
        let c = algo.cutpoint(&opts, &data);
        assert!(c <= 65536);
        assert!(c >= opts.min_size as usize);
    }

    #[test]
    fn test_window_shorter_than_one_word_past_min_does_not_panic() {
        let algo = UltraCdc;
        let opts = ChunkerOptions::without_normal_size(2048, 65536);
        for len in 2049..2056 {
            let data = vec![0u8; len];
            assert_eq!(algo.cutpoint(&opts, &data), len);
        }
    }

    #[test]
    fn test_derives_normal_size() {
        let algo = UltraCdc;
        assert_eq!(algo.default_options().normal_size, None);
    }
}
