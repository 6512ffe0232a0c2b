//! ## Directory structures
//!
//! The home block and the directory segments have fixed layouts, these are decoded with
//! `binrw`.  A segment is kept as its 512 raw words so that entry positions are plain
//! word indices; entries are records of `7 + extra_bytes/2` words starting at word 5.

use binrw::{BinRead,BinWrite};
use std::io::Cursor;
use log::{error,trace};
use super::types::*;
use super::rad50;
use crate::{STDRESULT,DYNERR};

/// The volume's home block (block 1)
#[derive(BinRead,BinWrite,Debug,Clone)]
#[brw(little)]
pub struct HomeBlock {
    pub reserved: [u16;16],
    /// pairs of (block,count) terminated by (0,0)
    pub bad_block_table: [u16;66],
    pub unused: [u16;151],
    pub pack_cluster: u16,
    pub first_dir_block: u16,
    pub system_version: u16,
    pub tail: [u16;20]
}

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct BadBlock {
    pub block: u16,
    pub count: u16
}

impl HomeBlock {
    pub fn from_bytes(buf: &[u8]) -> Result<Self,DYNERR> {
        Ok(Self::read(&mut Cursor::new(buf))?)
    }
    /// Block where segment 1 begins
    pub fn dir_block(&self) -> usize {
        match self.first_dir_block {
            0 => DEFAULT_DIR_BLOCK,
            b => b as usize
        }
    }
    pub fn bad_blocks(&self) -> Vec<BadBlock> {
        let mut ans = Vec::new();
        for pair in self.bad_block_table.chunks(2) {
            if pair[0]==0 && pair[1]==0 {
                break;
            }
            ans.push(BadBlock { block: pair[0], count: pair[1] });
        }
        ans
    }
}

/// The first five words of every segment.  Only segment 1's total, highest, and data start
/// are meaningful, but the splitter copies them into every segment it creates.
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SegmentHeader {
    pub total_segments: u16,
    pub next_segment: u16,
    pub highest_in_use: u16,
    pub extra_bytes: u16,
    pub data_start: u16
}

/// One directory record.  `extra` holds the words from offset 6 to the end of the record,
/// the first of which is the creation date.
#[derive(Debug,Clone,PartialEq)]
pub struct Entry {
    pub status: u16,
    pub name: [u16;3],
    pub length: u16,
    pub job: u16,
    pub extra: Vec<u16>
}

impl Entry {
    pub fn kind(&self) -> EntryKind {
        EntryKind::from_status(self.status)
    }
    /// Free means empty and neither tentative nor permanent
    pub fn is_free(&self) -> bool {
        self.status & E_MPTY > 0 && self.status & (E_TENT | E_PERM | E_EOS) == 0
    }
    pub fn is_permanent(&self) -> bool {
        self.kind()==EntryKind::Permanent
    }
    pub fn date(&self) -> u16 {
        match self.extra.first() {
            Some(d) => *d,
            None => 0
        }
    }
    pub fn name(&self) -> String {
        rad50::decode_name(self.name)
    }
    /// A file entry of the given width
    pub fn permanent(name: &str,length: u16,date: u16,width: usize) -> Self {
        let mut extra = vec![0;(width+1).saturating_sub(BASE_ENTRY_WORDS)];
        if let Some(d) = extra.first_mut() {
            *d = date;
        }
        Self {
            status: E_PERM,
            name: rad50::encode_name(name),
            length,
            job: 0,
            extra
        }
    }
    /// A free region of the given width
    pub fn empty(length: u16,width: usize) -> Self {
        Self {
            status: E_MPTY,
            name: [0;3],
            length,
            job: 0,
            extra: vec![0;(width+1).saturating_sub(BASE_ENTRY_WORDS)]
        }
    }
}

/// A directory segment as 512 little endian words
#[derive(BinRead,BinWrite,Clone)]
#[brw(little)]
pub struct Segment {
    pub words: [u16;SEGMENT_WORDS]
}

impl Segment {
    pub fn new() -> Self {
        Self { words: [0;SEGMENT_WORDS] }
    }
    pub fn from_bytes(buf: &[u8]) -> Result<Self,DYNERR> {
        if buf.len()!=SEGMENT_WORDS*2 {
            error!("segment buffer has {} bytes",buf.len());
            return Err(Box::new(Error::CorruptDirectory(format!("segment buffer of {} bytes",buf.len()))));
        }
        Ok(Self::read(&mut Cursor::new(buf))?)
    }
    pub fn to_bytes(&self) -> Result<Vec<u8>,DYNERR> {
        let mut curs = Cursor::new(Vec::new());
        self.write(&mut curs)?;
        Ok(curs.into_inner())
    }
    pub fn header(&self) -> SegmentHeader {
        SegmentHeader {
            total_segments: self.words[0],
            next_segment: self.words[1],
            highest_in_use: self.words[2],
            extra_bytes: self.words[3],
            data_start: self.words[4]
        }
    }
    pub fn set_header(&mut self,h: &SegmentHeader) {
        self.words[0] = h.total_segments;
        self.words[1] = h.next_segment;
        self.words[2] = h.highest_in_use;
        self.words[3] = h.extra_bytes;
        self.words[4] = h.data_start;
    }
    /// Width of one record in words
    pub fn entry_words(&self) -> usize {
        BASE_ENTRY_WORDS + self.words[3] as usize / 2
    }
    /// Scan the records, returning the word index of each real entry and the index where
    /// the scan stopped (the sentinel, or the first record that would not fit).
    pub fn scan(&self) -> (Vec<usize>,usize) {
        let width = self.entry_words();
        let mut slots = Vec::new();
        let mut idx = HEADER_WORDS;
        while idx + width <= SEGMENT_WORDS {
            if EntryKind::from_status(self.words[idx])==EntryKind::EndOfSegment {
                break;
            }
            slots.push(idx);
            idx += width;
        }
        trace!("segment scan found {} entries, end at word {}",slots.len(),idx);
        (slots,idx)
    }
    pub fn entry_slots(&self) -> Vec<usize> {
        self.scan().0
    }
    pub fn end_index(&self) -> usize {
        self.scan().1
    }
    /// True if one more record plus a relocated sentinel would still fit
    pub fn has_room(&self) -> bool {
        self.end_index() + 2*self.entry_words() <= SEGMENT_WORDS
    }
    fn check_record(&self,idx: usize) -> STDRESULT {
        if idx < HEADER_WORDS || idx + self.entry_words() > SEGMENT_WORDS {
            error!("record at word {} does not fit the segment",idx);
            return Err(Box::new(Error::CorruptDirectory(format!("record at word {} overflows segment",idx))));
        }
        Ok(())
    }
    pub fn get_entry(&self,idx: usize) -> Result<Entry,DYNERR> {
        self.check_record(idx)?;
        let width = self.entry_words();
        Ok(Entry {
            status: self.words[idx],
            name: [self.words[idx+1],self.words[idx+2],self.words[idx+3]],
            length: self.words[idx+4],
            job: self.words[idx+5],
            extra: self.words[idx+6..idx+width].to_vec()
        })
    }
    /// Write an entry at `idx`, extra words beyond the record width are dropped,
    /// missing ones are zeroed.
    pub fn put_entry(&mut self,idx: usize,entry: &Entry) -> STDRESULT {
        self.check_record(idx)?;
        let width = self.entry_words();
        self.words[idx] = entry.status;
        self.words[idx+1..idx+4].copy_from_slice(&entry.name);
        self.words[idx+4] = entry.length;
        self.words[idx+5] = entry.job;
        for i in BASE_ENTRY_WORDS-1..width {
            self.words[idx+i] = match entry.extra.get(i+1-BASE_ENTRY_WORDS) {
                Some(w) => *w,
                None => 0
            };
        }
        Ok(())
    }
    /// Clear a whole record and mark it as the end of the segment.
    /// If the full record does not fit only the status word is written.
    pub fn put_sentinel(&mut self,idx: usize) -> STDRESULT {
        if idx >= SEGMENT_WORDS {
            error!("sentinel at word {} is outside the segment",idx);
            return Err(Box::new(Error::CorruptDirectory(format!("sentinel at word {}",idx))));
        }
        let end = std::cmp::min(SEGMENT_WORDS,idx + self.entry_words());
        self.words[idx..end].fill(0);
        self.words[idx] = E_EOS;
        Ok(())
    }
    /// Open a gap of one record at `idx` by moving every record from `idx` to the end of the
    /// segment one record toward the end, a fresh sentinel follows the last record.
    /// The gap still holds the old contents.
    pub fn open_slot(&mut self,idx: usize) -> STDRESULT {
        let width = self.entry_words();
        let end = self.end_index();
        if idx < HEADER_WORDS || idx > end || !self.has_room() {
            error!("cannot open record at word {}, segment ends at {}",idx,end);
            return Err(Box::new(Error::CorruptDirectory(format!("no room for record at word {}",idx))));
        }
        self.words.copy_within(idx..end,idx+width);
        self.put_sentinel(end+width)
    }
    /// Keep records before `idx` and terminate the segment there
    pub fn truncate_at(&mut self,idx: usize) -> STDRESULT {
        self.check_record(idx)?;
        self.put_sentinel(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_with(extra_bytes: u16,lengths: &[u16]) -> Segment {
        let mut seg = Segment::new();
        seg.set_header(&SegmentHeader {
            total_segments: 4,
            next_segment: 0,
            highest_in_use: 1,
            extra_bytes,
            data_start: 20
        });
        let width = seg.entry_words();
        let mut idx = HEADER_WORDS;
        for len in lengths {
            seg.put_entry(idx,&Entry::permanent("A.B",*len,0,width)).expect("put failed");
            idx += width;
        }
        seg.put_sentinel(idx).expect("sentinel failed");
        seg
    }

    #[test]
    fn home_block_fields() {
        let mut buf = vec![0u8;BLOCK_SIZE];
        buf[32..34].copy_from_slice(&u16::to_le_bytes(100));
        buf[34..36].copy_from_slice(&u16::to_le_bytes(2));
        buf[466..468].copy_from_slice(&u16::to_le_bytes(1));
        buf[470..472].copy_from_slice(&u16::to_le_bytes(0x1234));
        let home = HomeBlock::from_bytes(&buf).expect("parse failed");
        assert_eq!(home.dir_block(),DEFAULT_DIR_BLOCK);
        assert_eq!(home.pack_cluster,1);
        assert_eq!(home.system_version,0x1234);
        assert_eq!(home.bad_blocks(),vec![BadBlock { block: 100, count: 2 }]);
        buf[468..470].copy_from_slice(&u16::to_le_bytes(10));
        assert_eq!(HomeBlock::from_bytes(&buf).expect("parse failed").dir_block(),10);
    }

    #[test]
    fn bytes_are_little_endian() {
        let seg = segment_with(2,&[5]);
        let bytes = seg.to_bytes().expect("serialize failed");
        assert_eq!(bytes.len(),1024);
        assert_eq!(&bytes[0..2],&[4,0]);
        assert_eq!(&bytes[10..12],&u16::to_le_bytes(E_PERM));
        let again = Segment::from_bytes(&bytes).expect("parse failed");
        assert_eq!(again.header(),seg.header());
    }

    #[test]
    fn scan_stops_at_sentinel() {
        let seg = segment_with(2,&[5,6,7]);
        assert_eq!(seg.entry_words(),8);
        let (slots,end) = seg.scan();
        assert_eq!(slots,vec![5,13,21]);
        assert_eq!(end,29);
    }

    #[test]
    fn open_slot_moves_tail() {
        let mut seg = segment_with(0,&[5,6,7]);
        seg.open_slot(12).expect("open failed");
        let slots = seg.entry_slots();
        assert_eq!(slots.len(),4);
        assert_eq!(seg.get_entry(19).unwrap().length,6);
        assert_eq!(seg.get_entry(26).unwrap().length,7);
        assert_eq!(seg.words[33],E_EOS);
    }

    #[test]
    fn full_segment_has_no_room() {
        // width 7, after 71 records a record and a sentinel no longer fit
        let lengths = vec![1u16;71];
        let seg = segment_with(0,&lengths);
        assert!(!seg.has_room());
        let lengths = vec![1u16;70];
        let seg = segment_with(0,&lengths);
        assert!(seg.has_room());
    }
}
