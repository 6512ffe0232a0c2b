//! ## Allocation
//!
//! Files go into the first free region that is large enough.  The free record becomes the
//! file's permanent record, and whatever is left over becomes a new free record right after
//! it.  If the segment cannot hold the extra record it is split and the whole attempt is
//! repeated from a fresh walk of the chain.

use log::{debug,info,error};
use super::types::*;
use super::directory::Entry;
use super::chain::{traverse,read_segment,write_segment};
use super::{date,names,split};
use crate::img::{BlockStore,blocks_needed};
use crate::DYNERR;

/// Where a file ended up
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Placement {
    pub segment: u16,
    /// word index of the record within the segment
    pub index: usize,
    pub start: usize,
    pub length: usize
}

enum Attempt {
    Placed(Placement),
    NeedsSplit(u16)
}

fn attempt(img: &mut dyn BlockStore,name: &str,dat: &[u8],date: u16) -> Result<Attempt,DYNERR> {
    let dir = traverse(img)?;
    dir.require_intact()?;
    let needed = blocks_needed(dat.len());
    let target = match dir.free_regions().find(|e| e.entry.length as usize >= needed) {
        Some(e) => e.clone(),
        None => {
            error!("no free region of {} blocks, largest is {}",needed,dir.largest_free());
            return Err(Box::new(Error::NoSpace));
        }
    };
    if target.start==0 || target.start + needed > dir.total_blocks {
        error!("free region at block {} runs past the end of the volume",target.start);
        return Err(Box::new(Error::BadExtent));
    }
    let mut seg = read_segment(img,dir.first_dir_block,target.segment)?;
    let width = seg.entry_words();
    let leftover = target.entry.length as usize - needed;
    if leftover > 0 && !seg.has_room() {
        debug!("segment {} is full",target.segment);
        return Ok(Attempt::NeedsSplit(target.segment));
    }
    match dat.len() {
        0 => img.write_blocks(target.start,&[0;BLOCK_SIZE])?,
        _ => img.write_blocks(target.start,dat)?
    };
    if leftover > 0 {
        let gap = target.index + width;
        seg.open_slot(gap)?;
        seg.put_entry(gap,&Entry::empty(leftover as u16,width))?;
    }
    seg.put_entry(target.index,&Entry::permanent(name,needed as u16,date,width))?;
    write_segment(img,dir.first_dir_block,target.segment,&seg)?;
    Ok(Attempt::Placed(Placement {
        segment: target.segment,
        index: target.index,
        start: target.start,
        length: needed
    }))
}

/// Store `dat` as a new file.  The name is normalized to 6.3.  If `date` is `None`
/// today's date is used.  Segments are split as needed, at most once for each segment
/// that was unused when the call began.
pub fn allocate(img: &mut dyn BlockStore,name: &str,dat: &[u8],date: Option<u16>) -> Result<Placement,DYNERR> {
    let name = names::normalize_name(name)?;
    let date = match date {
        Some(d) => d,
        None => date::pack_date(None)
    };
    let dir = traverse(img)?;
    dir.require_intact()?;
    let mut splits_left = dir.unused_segments();
    loop {
        match attempt(img,&name,dat,date)? {
            Attempt::Placed(p) => {
                info!("{} placed at block {}, {} blocks",name,p.start,p.length);
                return Ok(p);
            },
            Attempt::NeedsSplit(seg) => {
                if splits_left==0 {
                    error!("directory cannot grow any further");
                    return Err(Box::new(Error::DirectoryFull));
                }
                split::split(img,seg)?;
                splits_left -= 1;
            }
        }
    }
}
