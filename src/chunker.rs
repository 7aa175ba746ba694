//
// Copyright (c) 2025 Nathan Fiedler
//

//! The chunker framework: a buffered reader, an algorithm it drives, and
//! three ways to consume the resulting chunks.

use std::io::{Read, Write};

use crate::algorithm::CutpointAlgorithm;
use crate::error::Error;
use crate::options::ChunkerOptions;
use crate::registry;

/// Whether more chunks remain after a call to [`Chunker::next`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Status {
    /// At least one more chunk may follow.
    More,
    /// The source is exhausted; no further chunks will be produced.
    End,
}

///
/// A single emitted chunk: its byte offset within the stream, its length,
/// and an owned copy of its bytes.
///
/// Chunks are owned rather than borrowed from the internal buffer, trading
/// one copy per chunk for a public API with no aliasing lifetime to thread
/// through.
///
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chunk {
    pub offset: u64,
    pub length: u64,
    pub data: Vec<u8>,
}

///
/// Adapts a byte-oriented [`Read`] source into a stream of content-defined
/// chunks using a named, registered algorithm.
///
/// Internally holds a buffer of capacity `2 * MaxSize`, addressed by a
/// `[start, end)` live window, so the algorithm always sees up to `MaxSize`
/// contiguous bytes without a buffer reallocation per chunk. When the
/// window would otherwise run past the end of the allocation, the live
/// bytes are compacted back to offset 0.
///
pub struct Chunker<R> {
    source: R,
    algorithm: Box<dyn CutpointAlgorithm + Send>,
    options: ChunkerOptions,
    buffer: Vec<u8>,
    start: usize,
    end: usize,
    source_exhausted: bool,
    stream_offset: u64,
    done: bool,
}

impl<R: Read> Chunker<R> {
    /// Construct a chunker over `source` using the algorithm registered as
    /// `algorithm_name`. When `options` is `None`, the algorithm's own
    /// default options are used.
    pub fn new(
        algorithm_name: &str,
        source: R,
        options: Option<ChunkerOptions>,
    ) -> Result<Self, Error> {
        let algorithm = registry::construct(algorithm_name)?;
        let options = match options {
            Some(options) => options,
            None => algorithm.default_options(),
        };
        algorithm.validate(&options)?;
        let capacity = 2 * options.max_size as usize;
        Ok(Self {
            source,
            algorithm,
            options,
            buffer: vec![0u8; capacity],
            start: 0,
            end: 0,
            source_exhausted: false,
            stream_offset: 0,
            done: false,
        })
    }

    fn live_len(&self) -> usize {
        self.end - self.start
    }

    /// Ensure up to `MaxSize` contiguous bytes are visible starting at
    /// `self.start`, short of end-of-source.
    fn fill(&mut self) -> Result<(), Error> {
        let max_size = self.options.max_size as usize;
        if self.source_exhausted || self.live_len() >= max_size {
            return Ok(());
        }
        if self.start > 0 && self.end + max_size > self.buffer.len() {
            self.buffer.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        while !self.source_exhausted && self.live_len() < max_size {
            let read = self.source.read(&mut self.buffer[self.end..]).map_err(|err| {
                log::debug!("error reading source at offset {}: {err}", self.stream_offset);
                Error::Io(err)
            })?;
            if read == 0 {
                self.source_exhausted = true;
                break;
            }
            self.end += read;
        }
        Ok(())
    }

    ///
    /// Return the next chunk and whether more may follow. Once `End` is
    /// returned, all subsequent calls also return `End` with an empty
    /// chunk.
    ///
    pub fn next(&mut self) -> Result<(Chunk, Status), Error> {
        if self.done {
            return Ok((self.empty_chunk(), Status::End));
        }
        self.fill()?;
        let visible = self.live_len();
        if visible == 0 {
            self.done = true;
            return Ok((self.empty_chunk(), Status::End));
        }
        let window_len = visible.min(self.options.max_size as usize);
        let window = &self.buffer[self.start..self.start + window_len];
        let c = self.algorithm.cutpoint(&self.options, window);
        debug_assert!(c >= 1 && c <= window_len);
        let offset = self.stream_offset;
        let data = self.buffer[self.start..self.start + c].to_vec();
        self.start += c;
        self.stream_offset += c as u64;
        if self.source_exhausted && self.live_len() == 0 {
            self.done = true;
        }
        Ok((
            Chunk {
                offset,
                length: c as u64,
                data,
            },
            Status::More,
        ))
    }

    fn empty_chunk(&self) -> Chunk {
        Chunk {
            offset: self.stream_offset,
            length: 0,
            data: Vec::new(),
        }
    }

    /// Write every chunk to `sink` in order. Returns the total number of
    /// bytes written.
    pub fn copy(&mut self, sink: &mut impl Write) -> Result<u64, Error> {
        let mut total = 0u64;
        loop {
            let (chunk, status) = self.next()?;
            if !chunk.data.is_empty() {
                sink.write_all(&chunk.data).map_err(|err| {
                    log::debug!("error writing sink at offset {}: {err}", chunk.offset);
                    Error::Sink(err)
                })?;
                total += chunk.length;
            }
            if status == Status::End {
                return Ok(total);
            }
        }
    }

    ///
    /// Invoke `callback(offset, length, chunk)` for each chunk in order.
    /// `offset` is the cumulative byte offset of the chunk's first byte
    /// within the stream. Stops and propagates the callback's error, boxed
    /// into [`Error::Callback`], if it returns one.
    ///
    pub fn split<F, E>(&mut self, mut callback: F) -> Result<(), Error>
    where
        F: FnMut(u64, u64, &[u8]) -> Result<(), E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        loop {
            let (chunk, status) = self.next()?;
            if !chunk.data.is_empty() {
                callback(chunk.offset, chunk.length, &chunk.data).map_err(|err| {
                    log::debug!("split callback failed at offset {}: {err}", chunk.offset);
                    Error::Callback(Box::new(err))
                })?;
            }
            if status == Status::End {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_source() {
        let mut chunker = Chunker::new("fastcdc", Cursor::new(Vec::<u8>::new()), None).unwrap();
        let (chunk, status) = chunker.next().unwrap();
        assert_eq!(status, Status::End);
        assert_eq!(chunk.length, 0);
    }

    #[test]
    fn test_short_source_single_chunk() {
        let data = vec![0x42u8; 10];
        let mut chunker = Chunker::new("fastcdc", Cursor::new(data.clone()), None).unwrap();
        let (chunk, status) = chunker.next().unwrap();
        assert_eq!(chunk.data, data);
        assert_eq!(chunk.offset, 0);
        let (_, status2) = chunker.next().unwrap();
        assert_eq!(status, Status::More);
        assert_eq!(status2, Status::End);
    }

    #[test]
    fn test_unknown_algorithm_fails_construction() {
        let result = Chunker::new("nonexistent", Cursor::new(Vec::<u8>::new()), None);
        assert!(matches!(result, Err(Error::UnknownAlgorithm(_))));
    }

    #[test]
    fn test_invalid_options_fails_construction() {
        let opts = ChunkerOptions::new(8192, 8192, 65536);
        let result = Chunker::new("fastcdc", Cursor::new(Vec::<u8>::new()), Some(opts));
        assert!(matches!(result, Err(Error::InvalidOptions { .. })));
    }

    #[test]
    fn test_reconstructibility_small() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        let opts = ChunkerOptions::new(512, 2048, 8192);
        let mut chunker = Chunker::new("fastcdc", Cursor::new(data.clone()), Some(opts)).unwrap();
        let mut reconstructed = Vec::new();
        loop {
            let (chunk, status) = chunker.next().unwrap();
            reconstructed.extend_from_slice(&chunk.data);
            if status == Status::End {
                break;
            }
        }
        assert_eq!(reconstructed, data);
    }

    #[test]
    fn test_copy_matches_next_loop() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 97) as u8).collect();
        let opts = ChunkerOptions::new(512, 2048, 8192);
        let mut sink = Vec::new();
        let mut chunker = Chunker::new("fastcdc", Cursor::new(data.clone()), Some(opts)).unwrap();
        let written = chunker.copy(&mut sink).unwrap();
        assert_eq!(written as usize, data.len());
        assert_eq!(sink, data);
    }

    #[test]
    fn test_split_offsets_are_prefix_sums() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 181) as u8).collect();
        let opts = ChunkerOptions::new(512, 2048, 8192);
        let mut chunker = Chunker::new("fastcdc", Cursor::new(data), Some(opts)).unwrap();
        let mut expected_offset = 0u64;
        chunker
            .split::<_, std::io::Error>(|offset, length, _chunk| {
                assert_eq!(offset, expected_offset);
                expected_offset += length;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_split_propagates_callback_error() {
        #[derive(Debug)]
        struct BoomError;
        impl std::fmt::Display for BoomError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "boom")
            }
        }
        impl std::error::Error for BoomError {}

        let data = vec![0x11u8; 5000];
        let opts = ChunkerOptions::new(512, 2048, 8192);
        let mut chunker = Chunker::new("fastcdc", Cursor::new(data), Some(opts)).unwrap();
        let result = chunker.split(|_offset, _length, _chunk| Err(BoomError));
        assert!(matches!(result, Err(Error::Callback(_))));
    }
}
