//! ## Segment splitting
//!
//! When a segment cannot take another record, the tail of its records moves into an
//! unused segment that is linked in right after it.  Chain order, and so every derived
//! start block, is unchanged.

use log::{debug,info,error};
use super::types::*;
use super::directory::Segment;
use super::chain::{first_dir_block,live_segments,read_segment,write_segment};
use crate::img::BlockStore;
use crate::DYNERR;

/// What a split did
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SplitOutcome {
    pub old_segment: u16,
    pub new_segment: u16,
    /// records moved into the new segment
    pub moved: usize
}

/// Choose the position (in `slots`) of the first record to move.  The file entry closest
/// to the middle is preferred, so a run of free records is not cut when files exist.
fn split_point(seg: &Segment,slots: &[usize]) -> usize {
    let mid = slots.len()/2;
    let mut best: Option<usize> = None;
    for (pos,idx) in slots.iter().enumerate() {
        if seg.words[*idx] & (E_PERM | E_TENT) > 0 {
            best = match best {
                Some(b) if b.abs_diff(mid) <= pos.abs_diff(mid) => Some(b),
                _ => Some(pos)
            };
        }
    }
    let pos = best.unwrap_or(mid);
    // the last record alone is not worth a segment
    match pos + 1 >= slots.len() {
        true => mid,
        false => pos
    }
}

/// Split segment `target`, moving its later records into the first unused segment number.
pub fn split(img: &mut dyn BlockStore,target: u16) -> Result<SplitOutcome,DYNERR> {
    let first = first_dir_block(img)?;
    let (total,chain) = live_segments(img,first)?;
    if !chain.contains(&target) {
        error!("segment {} is not in the chain",target);
        return Err(Box::new(Error::CorruptDirectory(format!("segment {} is not in the chain",target))));
    }
    let new_seg = match (1..=total).find(|s| !chain.contains(s)) {
        Some(s) => s,
        None => {
            error!("all {} segments are in use",total);
            return Err(Box::new(Error::DirectoryFull));
        }
    };
    let mut old = read_segment(img,first,target)?;
    let slots = old.entry_slots();
    if slots.len()==0 {
        error!("segment {} has no entries to split",target);
        return Err(Box::new(Error::EmptySegment));
    }
    let pos = split_point(&old,&slots);
    let width = old.entry_words();
    debug!("splitting segment {} at record {} of {}",target,pos,slots.len());

    let old_header = old.header();
    // the new segment inherits the old one's successor
    let mut new = Segment::new();
    new.set_header(&old_header);
    let mut dst = HEADER_WORDS;
    for idx in &slots[pos..] {
        new.words[dst..dst+width].copy_from_slice(&old.words[*idx..*idx+width]);
        dst += width;
    }
    new.put_sentinel(dst)?;

    let mut h = old_header;
    h.next_segment = new_seg;
    if target==1 && new_seg > h.highest_in_use {
        h.highest_in_use = new_seg;
    }
    old.set_header(&h);
    old.truncate_at(slots[pos])?;

    write_segment(img,first,target,&old)?;
    write_segment(img,first,new_seg,&new)?;

    if target!=1 {
        let mut seg1 = read_segment(img,first,1)?;
        let mut h1 = seg1.header();
        if new_seg > h1.highest_in_use {
            h1.highest_in_use = new_seg;
            seg1.set_header(&h1);
            write_segment(img,first,1,&seg1)?;
        }
    }
    info!("split segment {} into {}, {} records moved",target,new_seg,slots.len()-pos);
    Ok(SplitOutcome {
        old_segment: target,
        new_segment: new_seg,
        moved: slots.len()-pos
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::directory::{Entry,SegmentHeader};

    /// `true` is a file, `false` a free region
    fn segment_of(files: &[bool]) -> (Segment,Vec<usize>) {
        let mut seg = Segment::new();
        seg.set_header(&SegmentHeader {
            total_segments: 4,
            next_segment: 0,
            highest_in_use: 1,
            extra_bytes: 0,
            data_start: 20
        });
        let width = seg.entry_words();
        let mut idx = HEADER_WORDS;
        for is_file in files {
            let entry = match is_file {
                true => Entry::permanent("F.DAT",1,0,width),
                false => Entry::empty(10,width)
            };
            seg.put_entry(idx,&entry).expect("put failed");
            idx += width;
        }
        seg.put_sentinel(idx).expect("sentinel failed");
        let slots = seg.entry_slots();
        (seg,slots)
    }

    #[test]
    fn file_nearest_middle() {
        let (seg,slots) = segment_of(&[false,false,true,false,false]);
        assert_eq!(split_point(&seg,&slots),2);
        let (seg,slots) = segment_of(&[false,true,false,false,false,false]);
        assert_eq!(split_point(&seg,&slots),1);
    }

    #[test]
    fn free_run_is_not_cut() {
        // the only file is first, so everything moves rather than splitting the free run
        let (seg,slots) = segment_of(&[true,false,false,false]);
        assert_eq!(split_point(&seg,&slots),0);
    }

    #[test]
    fn no_files_uses_middle() {
        let (seg,slots) = segment_of(&[false,false,false,false]);
        assert_eq!(split_point(&seg,&slots),2);
        let (seg,slots) = segment_of(&[false]);
        assert_eq!(split_point(&seg,&slots),0);
    }

    #[test]
    fn last_record_falls_back_to_middle() {
        let (seg,slots) = segment_of(&[false,false,false,true]);
        assert_eq!(split_point(&seg,&slots),2);
    }

    #[test]
    fn tie_goes_to_earlier_file() {
        let (seg,slots) = segment_of(&[false,true,false,true]);
        assert_eq!(split_point(&seg,&slots),1);
    }

    #[test]
    fn tentative_counts_as_file() {
        let (mut seg,slots) = segment_of(&[false,false,false,false,false]);
        seg.words[slots[3]] = E_TENT;
        assert_eq!(split_point(&seg,&slots),3);
    }
}
