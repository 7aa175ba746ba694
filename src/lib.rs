//
// Copyright (c) 2025 Nathan Fiedler
//

//! Content-defined chunking (CDC) with pluggable, registry-selected
//! algorithms.
//!
//! Splits a byte stream into variable-length chunks whose boundaries are
//! determined by local content rather than by position, so edits to a
//! stream perturb only the chunks near the edit. This is the building block
//! underneath deduplicating storage, synchronization, and delta encoding.
//!
//! Three reference algorithms are registered by default: `"fastcdc"`,
//! `"ultracdc"`, and `"jc"`. A fourth, experimental `"xorcdc"`, is available
//! behind the `xorcdc` Cargo feature. Third parties may register additional
//! algorithms via [`register`].
//!
//! # Example
//!
//! ```
//! use cdc_chunkers::{Chunker, Status};
//! use std::io::Cursor;
//!
//! let source = Cursor::new(vec![0u8; 4096]);
//! let mut chunker = Chunker::new("fastcdc", source, None).unwrap();
//! loop {
//!     let (chunk, status) = chunker.next().unwrap();
//!     if chunk.length > 0 {
//!         println!("chunk at {} of {} bytes", chunk.offset, chunk.length);
//!     }
//!     if status == Status::End {
//!         break;
//!     }
//! }
//! ```

mod algorithm;
mod algorithms;
mod chunker;
mod error;
mod options;
mod registry;
mod tables;

pub use algorithm::CutpointAlgorithm;
pub use chunker::{Chunk, Chunker, Status};
pub use error::{Error, OptionsField};
pub use options::ChunkerOptions;
pub use registry::{construct, register, Constructor};
