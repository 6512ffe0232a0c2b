//! ## In-memory block store
//!
//! A simple sequential dump of the volume's blocks held in a buffer.
//! Changes are not permanent until the caller saves `to_bytes` somewhere.

use log::error;
use super::{BlockStore,Error,BLOCK_SIZE};
use crate::DYNERR;

/// Wrapper for a buffered image
pub struct MemStore {
    blocks: usize,
    data: Vec<u8>
}

impl MemStore {
    /// Create an image of `blocks` zeroed blocks
    pub fn create(blocks: usize) -> Self {
        Self {
            blocks,
            data: vec![0;blocks*BLOCK_SIZE]
        }
    }
    /// Take ownership of a bytestream, which must be a whole number of blocks
    pub fn from_bytes(data: Vec<u8>) -> Result<Self,DYNERR> {
        if data.len()%BLOCK_SIZE > 0 {
            error!("image length {} is not a multiple of {}",data.len(),BLOCK_SIZE);
            return Err(Box::new(Error::ImageSize(data.len() as u64)));
        }
        Ok(Self {
            blocks: data.len()/BLOCK_SIZE,
            data
        })
    }
    pub fn to_bytes(&self) -> Vec<u8> {
        self.data.clone()
    }
}

impl BlockStore for MemStore {
    fn block_count(&self) -> usize {
        self.blocks
    }
    fn read_block(&mut self,iblock: usize) -> Result<Vec<u8>,DYNERR> {
        self.check_range(iblock)?;
        Ok(self.data[iblock*BLOCK_SIZE..(iblock+1)*BLOCK_SIZE].to_vec())
    }
    fn write_block(&mut self,iblock: usize,dat: &[u8]) -> Result<(),DYNERR> {
        self.check_range(iblock)?;
        if dat.len()!=BLOCK_SIZE {
            error!("attempt to write {} bytes to block {}",dat.len(),iblock);
            return Err(Box::new(Error::BufferSize(dat.len())));
        }
        self.data[iblock*BLOCK_SIZE..(iblock+1)*BLOCK_SIZE].copy_from_slice(dat);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_length_rejected() {
        assert!(MemStore::from_bytes(vec![0;1000]).is_err());
        assert!(MemStore::from_bytes(vec![0;1024]).is_ok());
    }

    #[test]
    fn block_io() {
        let mut store = MemStore::create(4);
        store.write_block(2,&[7;BLOCK_SIZE]).expect("write failed");
        assert_eq!(store.read_block(2).expect("read failed"),vec![7;BLOCK_SIZE]);
        assert_eq!(store.read_block(1).expect("read failed"),vec![0;BLOCK_SIZE]);
        assert!(store.read_block(4).is_err());
        assert!(store.write_block(0,&[0;100]).is_err());
    }
}
