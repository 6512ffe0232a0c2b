//! ## RT-11 file system module
//!
//! The volume is a flat run of 512 byte blocks.  Block 1 is the home block, which points
//! to a chain of two-block directory segments.  Files are contiguous, and are described
//! only by their lengths: a file starts where the previous entry in the chain ends.
//!
//! Submodules:
//! * `rad50` and `date` are the codecs for names and dates
//! * `directory` holds the on-disk structures
//! * `chain` walks the segment chain and derives start blocks
//! * `alloc` places new files, calling on `split` to grow the directory
//!
//! There is no delete, so free space is never merged, it is only consumed.

pub mod types;
pub mod rad50;
pub mod date;
pub mod names;
pub mod directory;
pub mod chain;
pub mod alloc;
pub mod split;
mod display;

use log::{info,debug,error,warn};
use types::*;
use directory::*;
use chain::{Directory,DirEntry};
use alloc::Placement;
use split::SplitOutcome;
use crate::img::BlockStore;
use crate::{STDRESULT,DYNERR};

/// The primary interface for disk operations.
pub struct Disk {
    img: Box<dyn BlockStore>
}

impl Disk {
    /// Use the given store as storage for the volume.
    pub fn from_img(img: Box<dyn BlockStore>) -> Self {
        Self { img }
    }
    /// Test an image for the directory structure.  This only rejects images that cannot
    /// hold a directory at all, a damaged chain is still accepted for reading.
    pub fn test_img(img: &mut dyn BlockStore) -> bool {
        let first = match chain::first_dir_block(img) {
            Ok(b) => b,
            Err(_) => {
                debug!("home block does not point to a directory");
                return false;
            }
        };
        let seg1 = match chain::read_segment(img,first,1) {
            Ok(s) => s,
            Err(_) => return false
        };
        let h = seg1.header();
        if h.extra_bytes%2 > 0 || HEADER_WORDS + 2*seg1.entry_words() > SEGMENT_WORDS {
            debug!("extra bytes {} is not plausible",h.extra_bytes);
            return false;
        }
        if h.data_start as usize > img.block_count() {
            debug!("data start {} is beyond the volume",h.data_start);
            return false;
        }
        true
    }
    pub fn get_img(&mut self) -> &mut Box<dyn BlockStore> {
        &mut self.img
    }
    pub fn home(&mut self) -> Result<HomeBlock,DYNERR> {
        chain::read_home(self.img.as_mut())
    }
    /// Walk the directory, damage is reported in `Directory::fault`
    pub fn directory(&mut self) -> Result<Directory,DYNERR> {
        chain::traverse(self.img.as_mut())
    }
    pub fn bad_blocks(&mut self) -> Result<Vec<BadBlock>,DYNERR> {
        Ok(self.home()?.bad_blocks())
    }
    /// Names of the files matching a `NAME.EXT` pattern, in directory order
    pub fn glob(&mut self,pattern: &str) -> Result<Vec<String>,DYNERR> {
        let dir = self.directory()?;
        let mut ans = Vec::new();
        for e in dir.files() {
            let name = e.entry.name();
            if names::is_match(&name,pattern)? {
                ans.push(name);
            }
        }
        Ok(ans)
    }
    /// Entries of the files matching a pattern, in directory order
    pub fn matching_files(&mut self,pattern: &str) -> Result<Vec<DirEntry>,DYNERR> {
        let dir = self.directory()?;
        let mut ans = Vec::new();
        for e in dir.files() {
            if names::is_match(&e.entry.name(),pattern)? {
                ans.push(e.clone());
            }
        }
        Ok(ans)
    }
    /// Read every block of the file, the result is always whole blocks
    pub fn read_entry(&mut self,e: &DirEntry) -> Result<Vec<u8>,DYNERR> {
        let len = e.entry.length as usize;
        if e.start==0 || e.start + len > self.img.block_count() {
            error!("{} claims blocks {} through {}",e.entry.name(),e.start,e.start+len);
            return Err(Box::new(Error::BadExtent));
        }
        self.img.read_blocks(e.start,len)
    }
    /// Read the file with the given name
    pub fn read_file(&mut self,name: &str) -> Result<Vec<u8>,DYNERR> {
        let dir = self.directory()?;
        match dir.find_file(name) {
            Some(e) => {
                let e = e.clone();
                self.read_entry(&e)
            },
            None => {
                error!("{} not found",name);
                Err(Box::new(Error::NoFile))
            }
        }
    }
    /// Write a new file, `date` is a packed word, `None` means today
    pub fn write_file(&mut self,name: &str,dat: &[u8],date: Option<u16>) -> Result<Placement,DYNERR> {
        alloc::allocate(self.img.as_mut(),name,dat,date)
    }
    /// Import one host file, returns `None` if it was skipped.
    /// The host name is normalized to 6.3.
    pub fn import(&mut self,host_name: &str,dat: &[u8],opt: &ImportOptions) -> Result<Option<Placement>,DYNERR> {
        let name = names::normalize_name(host_name)?;
        let dir = self.directory()?;
        if dir.find_file(&name).is_some() {
            if opt.no_replace {
                info!("{} is already on the volume, skipping",name);
                return Ok(None);
            }
            warn!("{} is already on the volume, adding a duplicate",name);
        }
        Ok(Some(self.write_file(&name,dat,opt.date)?))
    }
    /// Split a directory segment, normally this is done automatically during allocation
    pub fn split_segment(&mut self,seg: u16) -> Result<SplitOutcome,DYNERR> {
        split::split(self.img.as_mut(),seg)
    }
    pub fn read_block(&mut self,iblock: usize) -> Result<Vec<u8>,DYNERR> {
        self.img.read_block(iblock)
    }
    pub fn catalog_to_stdout(&mut self,label: &str,opt: &CatalogOptions) -> STDRESULT {
        let dir = self.directory()?;
        display::catalog(&dir,label,opt);
        Ok(())
    }
    pub fn bad_blocks_to_stdout(&mut self) -> STDRESULT {
        let home = self.home()?;
        display::bad_block_table(&home);
        Ok(())
    }
    /// Volume statistics as a JSON string, use `indent` to pretty print
    pub fn stat(&mut self,indent: Option<u16>) -> Result<String,DYNERR> {
        let home = self.home()?;
        let dir = self.directory()?;
        let mut bad = json::JsonValue::new_array();
        for b in home.bad_blocks() {
            bad.push(json::object! { block: b.block, count: b.count })?;
        }
        let mut ans = json::object! {
            fs_name: "rt11",
            block_size: BLOCK_SIZE,
            total_blocks: dir.total_blocks,
            first_dir_block: dir.first_dir_block,
            data_start: dir.data_start,
            segments: {
                total: dir.total_segments,
                in_use: dir.chain.len(),
                highest: dir.highest_in_use
            },
            entry_words: dir.entry_words(),
            files: dir.files().count(),
            used_blocks: dir.used_blocks(),
            free_blocks: dir.free_blocks(),
            largest_free: dir.largest_free(),
            pack_cluster: home.pack_cluster,
            system_version: hex::encode_upper(u16::to_be_bytes(home.system_version)),
            bad_blocks: bad
        };
        if let Some(msg) = dir.fault {
            ans["corrupt"] = msg.into();
        }
        Ok(match indent {
            Some(spaces) => json::stringify_pretty(ans,spaces),
            None => json::stringify(ans)
        })
    }
}
