//! # `rt11kit` main library
//!
//! This library manipulates disk images carrying the RT-11 style flat file system:
//! 512 byte blocks, a chain of two-block directory segments, contiguous files, and
//! RAD-50 encoded 6.3 file names.
//!
//! ## Architecture
//!
//! Disk image operations are built around two layers:
//! * `img::BlockStore` reads and writes blocks, it does not try to interpret a file system
//! * `fs::rt11::Disk` imposes the directory structure on the blocks
//!
//! When a `Disk` is created it takes ownership of some `BlockStore`.  A file backed store
//! writes through to the host immediately, a memory store holds changes until the
//! caller saves the buffer.
//!
//! ## Directory Engine
//!
//! The part that matters is in `fs::rt11`:
//! * `chain` walks the segment chain, deriving each entry's start block from the lengths
//!   of the entries before it, and detects cycles and bad links
//! * `alloc` carves files out of free regions on a first fit basis
//! * `split` grows the directory by moving records into an unused segment

pub mod fs;
pub mod img;
pub mod commands;

use std::path::Path;
use log::info;
use img::BlockStore;

type DYNERR = Box<dyn std::error::Error>;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

fn try_img(mut img: Box<dyn BlockStore>) -> Result<fs::rt11::Disk,DYNERR> {
    if fs::rt11::Disk::test_img(img.as_mut()) {
        info!("identified RT-11 file system");
        return Ok(fs::rt11::Disk::from_img(img));
    }
    log::warn!("cannot match the file system");
    Err(Box::new(fs::Error::FileSystemMismatch))
}

/// Open an image file as a volume.  If `writable` is false the file is opened read only.
pub fn open_volume(img_path: &Path,writable: bool) -> Result<fs::rt11::Disk,DYNERR> {
    let store = img::file::FileStore::open(img_path,writable)?;
    try_img(Box::new(store))
}

/// Given a bytestream return a volume backed by memory, or Err if the bytestream cannot be interpreted.
pub fn volume_from_bytes(dat: Vec<u8>) -> Result<fs::rt11::Disk,DYNERR> {
    let store = img::mem::MemStore::from_bytes(dat)?;
    try_img(Box::new(store))
}

/// Display binary to stdout in columns of hex and ascii
pub fn display_block(start_addr: usize,block: &[u8]) {
    let mut slice_start = 0;
    loop {
        let row_label = start_addr + slice_start;
        let mut slice_end = slice_start + 16;
        if slice_end > block.len() {
            slice_end = block.len();
        }
        let slice = block[slice_start..slice_end].to_vec();
        let txt: Vec<u8> = slice.iter().map(|c| match *c {
            x if x<32 => '.' as u8,
            x if x<127 => x,
            _ => '.' as u8
        }).collect();
        print!("{:04X} : ",row_label);
        for byte in &slice {
            print!("{:02X} ",byte);
        }
        for _blank in slice_end..slice_start+16 {
            print!("   ");
        }
        println!("| {}",String::from_utf8_lossy(&txt));
        slice_start += 16;
        if slice_end==block.len() {
            break;
        }
    }
}

/// Display a word-oriented view, each row is 8 words with their RAD-50 reading
pub fn display_words(start_addr: usize,block: &[u8]) {
    for (row,chunk) in block.chunks(16).enumerate() {
        print!("{:04X} : ",start_addr + row*16);
        let mut rad = String::new();
        for pair in chunk.chunks(2) {
            let w = match pair.len() {
                2 => u16::from_le_bytes([pair[0],pair[1]]),
                _ => pair[0] as u16
            };
            print!("{:06o} ",w);
            rad += &format!("{:3}",fs::rt11::rad50::decode(w));
        }
        println!("| {}",rad);
    }
}

#[test]
fn test_word_view() {
    // only checks the routine does not panic on odd lengths
    display_words(0,&[1,2,3]);
    display_block(0,&[0x41;20]);
}
