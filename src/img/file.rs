//! ## File backed block store
//!
//! Every read or write is a seek followed by a transfer of exactly one block.
//! Nothing is cached, so changes are on the host as soon as `write_block` returns.

use std::fs::{File,OpenOptions};
use std::io::{Read,Seek,SeekFrom,Write};
use std::path::Path;
use log::{debug,error};
use super::{BlockStore,Error,BLOCK_SIZE};
use crate::DYNERR;

pub struct FileStore {
    file: File,
    blocks: usize
}

impl FileStore {
    /// Open an image file, use `writable` if the volume will be modified
    pub fn open(path: &Path,writable: bool) -> Result<Self,DYNERR> {
        let file = OpenOptions::new().read(true).write(writable).open(path)?;
        let len = file.metadata()?.len();
        if len%BLOCK_SIZE as u64 > 0 {
            error!("image length {} is not a multiple of {}",len,BLOCK_SIZE);
            return Err(Box::new(Error::ImageSize(len)));
        }
        debug!("opened {} with {} blocks",path.display(),len/BLOCK_SIZE as u64);
        Ok(Self {
            file,
            blocks: (len/BLOCK_SIZE as u64) as usize
        })
    }
    fn seek_to(&mut self,iblock: usize) -> Result<(),DYNERR> {
        self.check_range(iblock)?;
        match self.file.seek(SeekFrom::Start((iblock*BLOCK_SIZE) as u64)) {
            Ok(_) => Ok(()),
            Err(e) => Err(Box::new(Error::IoFault(iblock,e)))
        }
    }
}

impl BlockStore for FileStore {
    fn block_count(&self) -> usize {
        self.blocks
    }
    fn read_block(&mut self,iblock: usize) -> Result<Vec<u8>,DYNERR> {
        self.seek_to(iblock)?;
        let mut buf = vec![0;BLOCK_SIZE];
        match self.file.read_exact(&mut buf) {
            Ok(()) => Ok(buf),
            Err(e) => {
                error!("read failed at block {}",iblock);
                Err(Box::new(Error::IoFault(iblock,e)))
            }
        }
    }
    fn write_block(&mut self,iblock: usize,dat: &[u8]) -> Result<(),DYNERR> {
        if dat.len()!=BLOCK_SIZE {
            error!("attempt to write {} bytes to block {}",dat.len(),iblock);
            return Err(Box::new(Error::BufferSize(dat.len())));
        }
        self.seek_to(iblock)?;
        match self.file.write_all(dat) {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("write failed at block {}",iblock);
                Err(Box::new(Error::IoFault(iblock,e)))
            }
        }
    }
}
