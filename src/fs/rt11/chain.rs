//! ## Segment chain
//!
//! Segments are numbered from 1 and linked through header word 1, with 0 ending the chain.
//! Segment `n` occupies the two blocks starting at `first_dir_block + (n-1)*2`.
//! No entry stores its start block, the start is the data start plus the lengths of every
//! entry before it in chain order, so all positions come from one walk of the chain.

use log::{debug,warn,error};
use super::types::*;
use super::directory::*;
use crate::img::BlockStore;
use crate::{STDRESULT,DYNERR};

/// An entry together with where it lives and where its data begins
#[derive(Debug,Clone)]
pub struct DirEntry {
    pub entry: Entry,
    /// segment number holding the record
    pub segment: u16,
    /// word index of the record within the segment
    pub index: usize,
    /// derived start block
    pub start: usize
}

/// Result of walking the chain.  If `fault` is set the walk stopped early and the
/// entries are only those found before the problem.
#[derive(Debug,Clone)]
pub struct Directory {
    pub total_blocks: usize,
    pub first_dir_block: usize,
    pub total_segments: u16,
    pub highest_in_use: u16,
    pub extra_bytes: u16,
    pub data_start: usize,
    /// segment numbers in chain order
    pub chain: Vec<u16>,
    pub entries: Vec<DirEntry>,
    pub fault: Option<String>
}

impl Directory {
    /// Mutations refuse to work on a directory that could not be fully walked
    pub fn require_intact(&self) -> STDRESULT {
        match &self.fault {
            Some(msg) => {
                error!("refusing to modify directory: {}",msg);
                Err(Box::new(Error::CorruptDirectory(msg.clone())))
            },
            None => Ok(())
        }
    }
    pub fn entry_words(&self) -> usize {
        BASE_ENTRY_WORDS + self.extra_bytes as usize / 2
    }
    pub fn unused_segments(&self) -> usize {
        (self.total_segments as usize).saturating_sub(self.chain.len())
    }
    pub fn files(&self) -> impl Iterator<Item = &DirEntry> {
        self.entries.iter().filter(|e| e.entry.is_permanent())
    }
    pub fn free_regions(&self) -> impl Iterator<Item = &DirEntry> {
        self.entries.iter().filter(|e| e.entry.is_free())
    }
    pub fn used_blocks(&self) -> usize {
        self.files().map(|e| e.entry.length as usize).sum()
    }
    pub fn free_blocks(&self) -> usize {
        self.free_regions().map(|e| e.entry.length as usize).sum()
    }
    pub fn largest_free(&self) -> usize {
        self.free_regions().map(|e| e.entry.length as usize).max().unwrap_or(0)
    }
    /// First permanent file with this name, case insensitive
    pub fn find_file(&self,name: &str) -> Option<&DirEntry> {
        let upper = name.to_uppercase();
        self.files().find(|e| e.entry.name()==upper)
    }
}

/// Block where segment `seg` begins
pub fn segment_block(first_dir_block: usize,seg: u16) -> usize {
    first_dir_block + (seg as usize - 1)*SEGMENT_BLOCKS
}

pub fn read_home(img: &mut dyn BlockStore) -> Result<HomeBlock,DYNERR> {
    let buf = img.read_block(HOME_BLOCK)?;
    HomeBlock::from_bytes(&buf)
}

pub fn read_segment(img: &mut dyn BlockStore,first_dir_block: usize,seg: u16) -> Result<Segment,DYNERR> {
    let buf = img.read_blocks(segment_block(first_dir_block,seg),SEGMENT_BLOCKS)?;
    Segment::from_bytes(&buf)
}

pub fn write_segment(img: &mut dyn BlockStore,first_dir_block: usize,seg: u16,segment: &Segment) -> STDRESULT {
    let buf = segment.to_bytes()?;
    let block = segment_block(first_dir_block,seg);
    debug!("write segment {} at block {}",seg,block);
    for i in 0..SEGMENT_BLOCKS {
        img.write_block(block+i,&buf[i*BLOCK_SIZE..(i+1)*BLOCK_SIZE])?;
    }
    Ok(())
}

/// Locate segment 1, failing if it cannot be on the volume at all
pub fn first_dir_block(img: &mut dyn BlockStore) -> Result<usize,DYNERR> {
    let home = read_home(img)?;
    let first = home.dir_block();
    if first + SEGMENT_BLOCKS > img.block_count() {
        error!("directory at block {} is outside a volume of {} blocks",first,img.block_count());
        return Err(Box::new(Error::CorruptDirectory(format!("directory block {} outside volume",first))));
    }
    Ok(first)
}

/// Walk the chain and derive every entry's start block.  Problems with the chain are
/// recorded in `fault` and the entries gathered so far are kept.
pub fn traverse(img: &mut dyn BlockStore) -> Result<Directory,DYNERR> {
    let first = read_home(img)?.dir_block();
    let total_blocks = img.block_count();
    if first + SEGMENT_BLOCKS > total_blocks {
        let msg = format!("segment 1 at block {} is beyond the volume",first);
        warn!("directory is corrupt: {}",msg);
        return Ok(Directory {
            total_blocks,
            first_dir_block: first,
            total_segments: 1,
            highest_in_use: 0,
            extra_bytes: 0,
            data_start: 0,
            chain: Vec::new(),
            entries: Vec::new(),
            fault: Some(msg)
        });
    }
    let seg1 = read_segment(img,first,1)?;
    let h = seg1.header();
    let mut fault: Option<String> = None;
    let mut total = h.total_segments;
    if total==0 || total > MAX_SEGMENTS {
        fault = Some(format!("segment count {} is out of range",total));
        total = 1;
    }
    let mut ans = Directory {
        total_blocks,
        first_dir_block: first,
        total_segments: total,
        highest_in_use: h.highest_in_use,
        extra_bytes: h.extra_bytes,
        data_start: h.data_start as usize,
        chain: Vec::new(),
        entries: Vec::new(),
        fault: None
    };
    let mut visited = vec![false;total as usize + 1];
    let mut offset: usize = 0;
    let mut seg = 1;
    while seg!=0 {
        if seg > total {
            fault = Some(format!("link to segment {} outside 1..{}",seg,total));
            break;
        }
        if visited[seg as usize] {
            fault = Some(format!("segment {} is linked twice",seg));
            break;
        }
        visited[seg as usize] = true;
        let block = segment_block(first,seg);
        if block + SEGMENT_BLOCKS > total_blocks {
            fault = Some(format!("segment {} at block {} is beyond the volume",seg,block));
            break;
        }
        let segment = match seg {
            1 => seg1.clone(),
            _ => read_segment(img,first,seg)?
        };
        for idx in segment.entry_slots() {
            let entry = segment.get_entry(idx)?;
            let len = entry.length as usize;
            ans.entries.push(DirEntry {
                entry,
                segment: seg,
                index: idx,
                start: ans.data_start + offset
            });
            offset += len;
        }
        ans.chain.push(seg);
        seg = segment.header().next_segment;
    }
    if let Some(msg) = &fault {
        warn!("directory is corrupt: {}",msg);
    }
    debug!("walked {} segments, {} entries",ans.chain.len(),ans.entries.len());
    ans.fault = fault;
    Ok(ans)
}

/// Walk only the links, any irregularity is an error.
/// Returns the segment count from segment 1 and the segment numbers in chain order.
pub fn live_segments(img: &mut dyn BlockStore,first_dir_block: usize) -> Result<(u16,Vec<u16>),DYNERR> {
    let total = read_segment(img,first_dir_block,1)?.header().total_segments;
    if total==0 || total > MAX_SEGMENTS {
        error!("segment count {} is out of range",total);
        return Err(Box::new(Error::CorruptDirectory(format!("segment count {} is out of range",total))));
    }
    let mut visited = vec![false;total as usize + 1];
    let mut chain = Vec::new();
    let mut seg = 1;
    while seg!=0 {
        if seg > total {
            error!("link to segment {} outside 1..{}",seg,total);
            return Err(Box::new(Error::CorruptDirectory(format!("link to segment {}",seg))));
        }
        if visited[seg as usize] {
            error!("segment {} is linked twice",seg);
            return Err(Box::new(Error::CorruptDirectory(format!("loop at segment {}",seg))));
        }
        visited[seg as usize] = true;
        chain.push(seg);
        seg = read_segment(img,first_dir_block,seg)?.header().next_segment;
    }
    Ok((total,chain))
}
