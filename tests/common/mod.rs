// Builds synthetic volumes for the tests.  Only the home block and the directory
// segments are filled in, data blocks are zero.
#![allow(dead_code)]

use rt11kit::fs::rt11::rad50;
use rt11kit::fs::rt11::types::{E_EOS,E_MPTY,E_PERM,E_TENT};

pub const BLOCK_SIZE: usize = 512;

pub struct Rec {
    pub status: u16,
    pub name: String,
    pub length: u16,
    pub date: u16
}

pub fn perm(name: &str,length: u16) -> Rec {
    Rec { status: E_PERM, name: name.to_string(), length, date: 0 }
}

pub fn dated(name: &str,length: u16,date: u16) -> Rec {
    Rec { status: E_PERM, name: name.to_string(), length, date }
}

pub fn tent(name: &str,length: u16) -> Rec {
    Rec { status: E_TENT, name: name.to_string(), length, date: 0 }
}

pub fn free(length: u16) -> Rec {
    Rec { status: E_MPTY, name: String::new(), length, date: 0 }
}

pub struct Seg {
    pub num: u16,
    pub next: u16,
    pub recs: Vec<Rec>
}

pub struct Volume {
    pub blocks: usize,
    /// 0 means the default block 6
    pub dir_block: u16,
    pub total_segments: u16,
    pub highest: u16,
    pub extra_bytes: u16,
    pub data_start: u16,
    pub bad: Vec<(u16,u16)>,
    pub segments: Vec<Seg>
}

impl Volume {
    pub fn new(blocks: usize,total_segments: u16,data_start: u16) -> Self {
        Self {
            blocks,
            dir_block: 6,
            total_segments,
            highest: 1,
            extra_bytes: 0,
            data_start,
            bad: Vec::new(),
            segments: Vec::new()
        }
    }
    pub fn seg(mut self,num: u16,next: u16,recs: Vec<Rec>) -> Self {
        if num > self.highest {
            self.highest = num;
        }
        self.segments.push(Seg { num, next, recs });
        self
    }
    pub fn build(&self) -> Vec<u8> {
        let mut img = vec![0u8;self.blocks*BLOCK_SIZE];
        let put = |img: &mut Vec<u8>,byte: usize,w: u16| {
            img[byte..byte+2].copy_from_slice(&u16::to_le_bytes(w));
        };
        let home = BLOCK_SIZE;
        for (i,(b,c)) in self.bad.iter().enumerate() {
            put(&mut img,home + 32 + i*4,*b);
            put(&mut img,home + 34 + i*4,*c);
        }
        put(&mut img,home + 466,1);
        put(&mut img,home + 468,self.dir_block);
        put(&mut img,home + 470,0x0503);
        let first = match self.dir_block {
            0 => 6,
            b => b as usize
        };
        let width = 7 + self.extra_bytes as usize/2;
        for seg in &self.segments {
            let base = (first + (seg.num as usize - 1)*2)*BLOCK_SIZE;
            let header = [self.total_segments,seg.next,self.highest,self.extra_bytes,self.data_start];
            for (i,w) in header.iter().enumerate() {
                put(&mut img,base + i*2,*w);
            }
            let mut idx = 5;
            for r in &seg.recs {
                let name = rad50::encode_name(&r.name);
                let words = [r.status,name[0],name[1],name[2],r.length,0,r.date];
                for (i,w) in words.iter().enumerate() {
                    put(&mut img,base + (idx+i)*2,*w);
                }
                idx += width;
            }
            put(&mut img,base + idx*2,E_EOS);
        }
        img
    }
}
