//! # Disk Image Module
//!
//! Disk images are represented by objects implementing the `BlockStore` trait.
//! The block store knows nothing about the directory; it only moves 512 byte blocks
//! between the caller and some backing storage.
//!
//! ## Implementations
//!
//! * `file::FileStore` performs positioned I/O directly against an image file, every
//!   call goes to the host file system, there is no cache.
//! * `mem::MemStore` keeps the whole image in a buffer, this is used for tests and for
//!   images that arrive as a bytestream.
//!
//! ## Relation to File Systems
//!
//! The `BlockStore` trait object serves as the underlying storage for the `fs` module.
//! Block numbering is zero based from the start of the image.  The block count is
//! fixed when the store is created, and is derived from the byte length of the image.

pub mod file;
pub mod mem;

use crate::DYNERR;

pub const BLOCK_SIZE: usize = 512;

/// Enumerates block store errors.  Every variant is an I/O fault, i.e., the request could
/// not be carried out and the operation that made it should be abandoned.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("i/o fault at block {0}: {1}")]
    IoFault(usize,std::io::Error),
    #[error("image size {0} is not a multiple of the block size")]
    ImageSize(u64),
    #[error("block {0} is beyond the end of the image")]
    BlockRange(usize),
    #[error("write buffer of {0} bytes is not a block")]
    BufferSize(usize)
}

/// Random access to the fixed size blocks of a volume.
pub trait BlockStore {
    /// Number of whole blocks in the image
    fn block_count(&self) -> usize;
    /// Read one block, the result is always `BLOCK_SIZE` bytes
    fn read_block(&mut self,iblock: usize) -> Result<Vec<u8>,DYNERR>;
    /// Write one block, `dat` must be exactly `BLOCK_SIZE` bytes
    fn write_block(&mut self,iblock: usize,dat: &[u8]) -> Result<(),DYNERR>;
    /// Read consecutive blocks into one buffer
    fn read_blocks(&mut self,start: usize,count: usize) -> Result<Vec<u8>,DYNERR> {
        let mut ans = Vec::with_capacity(count*BLOCK_SIZE);
        for iblock in start..start+count {
            ans.append(&mut self.read_block(iblock)?);
        }
        Ok(ans)
    }
    /// Write `dat` into consecutive blocks beginning at `start`, the last block is zero padded.
    /// Returns the number of blocks written.
    fn write_blocks(&mut self,start: usize,dat: &[u8]) -> Result<usize,DYNERR> {
        let mut count = 0;
        for chunk in dat.chunks(BLOCK_SIZE) {
            let padded = quantize_block(chunk);
            self.write_block(start+count,&padded)?;
            count += 1;
        }
        Ok(count)
    }
    /// Check the block number against the image, used by implementations
    fn check_range(&self,iblock: usize) -> Result<(),DYNERR> {
        if iblock >= self.block_count() {
            log::error!("block {} requested, image has {}",iblock,self.block_count());
            return Err(Box::new(Error::BlockRange(iblock)));
        }
        Ok(())
    }
}

/// Pad (or truncate) a slice to exactly one block
pub fn quantize_block(src: &[u8]) -> Vec<u8> {
    let mut padded = src.to_vec();
    padded.resize(BLOCK_SIZE,0);
    padded
}

/// Number of blocks needed to hold `len` bytes, an empty file still takes one block
pub fn blocks_needed(len: usize) -> usize {
    match len {
        0 => 1,
        l => (l + BLOCK_SIZE - 1) / BLOCK_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_counts() {
        assert_eq!(blocks_needed(0),1);
        assert_eq!(blocks_needed(1),1);
        assert_eq!(blocks_needed(512),1);
        assert_eq!(blocks_needed(513),2);
        assert_eq!(blocks_needed(1536),3);
    }

    #[test]
    fn padding() {
        let padded = quantize_block(&[1,2,3]);
        assert_eq!(padded.len(),BLOCK_SIZE);
        assert_eq!(&padded[0..4],&[1,2,3,0]);
    }
}
