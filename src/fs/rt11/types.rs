pub const BLOCK_SIZE: usize = 512;
pub const HOME_BLOCK: usize = 1;
pub const DEFAULT_DIR_BLOCK: usize = 6;
pub const SEGMENT_BLOCKS: usize = 2;
pub const SEGMENT_WORDS: usize = 512;
pub const HEADER_WORDS: usize = 5;
pub const BASE_ENTRY_WORDS: usize = 7;
pub const MAX_SEGMENTS: u16 = 31;

/// status bits of an entry
pub const E_TENT: u16 = 0x0100;
pub const E_MPTY: u16 = 0x0200;
pub const E_PERM: u16 = 0x0400;
pub const E_EOS: u16 = 0x0800;
pub const E_READ: u16 = 0x4000;
pub const E_PROT: u16 = 0x8000;

/// Enumerates directory errors.  The `Display` trait will print the long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("corrupt directory: {0}")]
    CorruptDirectory(String),
    #[error("insufficient space")]
    NoSpace,
    #[error("directory full")]
    DirectoryFull,
    #[error("segment has no entries")]
    EmptySegment,
    #[error("illegal filename")]
    InvalidName,
    #[error("invalid date")]
    InvalidDate,
    #[error("no file")]
    NoFile,
    #[error("file extent lies outside the volume")]
    BadExtent
}

/// Kind of a directory entry, from its status word.
/// The end marker wins over everything, then permanent, tentative, empty.
#[derive(PartialEq,Eq,Clone,Copy,Debug)]
pub enum EntryKind {
    Permanent,
    Tentative,
    Empty,
    EndOfSegment,
    Unknown
}

impl EntryKind {
    pub fn from_status(status: u16) -> Self {
        if status & E_EOS > 0 || status==0 {
            Self::EndOfSegment
        } else if status & E_PERM > 0 {
            Self::Permanent
        } else if status & E_TENT > 0 {
            Self::Tentative
        } else if status & E_MPTY > 0 {
            Self::Empty
        } else {
            Self::Unknown
        }
    }
}

/// Options for the directory listing
#[derive(Clone,Copy,Default)]
pub struct CatalogOptions {
    /// names only, no summary
    pub brief: bool,
    /// include free regions
    pub empty: bool
}

/// Options governing import of host files
#[derive(Clone,Copy,Default)]
pub struct ImportOptions {
    /// skip files whose name is already in the directory
    pub no_replace: bool,
    /// packed date word to stamp, `None` means use the clock
    pub date: Option<u16>
}

/// Options governing export to the host
#[derive(Clone,Copy,Default)]
pub struct ExportOptions {
    /// skip files that already exist on the host
    pub no_replace: bool
}
