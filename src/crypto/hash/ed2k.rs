//! ed2k content hash: MD4 over fixed-size blocks, then MD4 over the list of
//! block digests.
//!
//! A stream that fits in one block hashes to the plain MD4 of its content.
//! A stream whose length is an exact multiple of the block size gets no
//! trailing digest of an empty block (the variant eMule calls "blue").

use std::io::{self, Read};

use super::digest::Digest;
use super::md4::Md4;

/// Bytes requested from the source per read.
pub const BUF_SIZE: usize = 50 * 1024;
/// Reads per ed2k block.
pub const BLOCKS: usize = 190;
/// ed2k block size, 9_728_000 bytes.
pub const BLOCK_SIZE: usize = BLOCKS * BUF_SIZE;

#[derive(Clone)]
pub struct Ed2k {
    block_size: usize,
    block: Md4,
    block_len: usize,
    blocks: Vec<Digest>,
    len: u64,
}

impl Ed2k {
    pub fn new() -> Self {
        Self::with_block_size(BLOCK_SIZE)
    }

    /// Panics if `block_size` is zero.
    pub fn with_block_size(block_size: usize) -> Self {
        assert!(block_size > 0, "ed2k block size must be non-zero");
        Self {
            block_size,
            block: Md4::new(),
            block_len: 0,
            blocks: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Total bytes absorbed so far.
    #[inline]
    pub fn size(&self) -> u64 {
        self.len
    }

    /// Block boundaries are tracked here, so any chunking of the input
    /// gives the same result.
    pub fn update(&mut self, mut data: &[u8]) {
        self.len += data.len() as u64;

        while !data.is_empty() {
            let take = (self.block_size - self.block_len).min(data.len());
            let (head, tail) = data.split_at(take);
            self.block.update(head);
            self.block_len += take;
            data = tail;

            if self.block_len == self.block_size {
                self.close_block();
            }
        }
    }

    fn close_block(&mut self) {
        let block = core::mem::replace(&mut self.block, Md4::new());
        self.blocks.push(Digest::new(block.finalize()));
        self.block_len = 0;
    }

    pub fn finalize(mut self) -> Ed2kDigest {
        // An empty stream still yields one block (the digest of nothing);
        // a stream ending on a boundary yields none.
        if self.block_len > 0 || self.blocks.is_empty() {
            self.close_block();
        }

        Ed2kDigest {
            digest: combine(&self.blocks),
            len: self.len,
            blocks: self.blocks,
        }
    }

    pub fn oneshot<T: AsRef<[u8]>>(data: T) -> Ed2kDigest {
        let mut ed2k = Self::new();
        ed2k.update(data.as_ref());
        ed2k.finalize()
    }
}

impl Default for Ed2k {
    fn default() -> Self {
        Self::new()
    }
}

impl std::io::Write for Ed2k {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Folds the per-block digests into the top-level digest.
///
/// A single block passes through unchanged; otherwise the concatenated
/// block digests are hashed once more.
pub fn combine(blocks: &[Digest]) -> Digest {
    if let [single] = blocks {
        return *single;
    }
    let mut md4 = Md4::new();
    for block in blocks {
        md4.update(block.as_bytes());
    }
    Digest::new(md4.finalize())
}

/// Result of an ed2k computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed2kDigest {
    digest: Digest,
    len: u64,
    blocks: Vec<Digest>,
}

impl Ed2kDigest {
    #[inline]
    pub fn digest(&self) -> Digest {
        self.digest
    }

    /// Total number of bytes hashed.
    #[inline]
    pub fn size(&self) -> u64 {
        self.len
    }

    /// Per-block digests, in stream order.
    #[inline]
    pub fn blocks(&self) -> &[Digest] {
        &self.blocks
    }

    /// ed2k link for a file called `name`; directories are stripped.
    pub fn link(&self, name: &str) -> String {
        link(crate::utils::basename(name), self.len, &self.digest)
    }
}

/// Formats `ed2k://|file|<name>|<size>|<hex>|`.
pub fn link(name: &str, size: u64, digest: &Digest) -> String {
    format!("ed2k://|file|{name}|{size}|{digest}|")
}

/// Hashes everything `reader` yields until EOF, reading `BUF_SIZE` bytes at
/// a time. Read errors abort the computation.
pub fn process<R: Read>(reader: R) -> io::Result<Ed2kDigest> {
    process_with_block_size(reader, BLOCK_SIZE)
}

pub fn process_with_block_size<R: Read>(mut reader: R, block_size: usize) -> io::Result<Ed2kDigest> {
    let mut ed2k = Ed2k::with_block_size(block_size);
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = crate::utils::read_full(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        ed2k.update(&buf[..n]);
    }
    Ok(ed2k.finalize())
}
