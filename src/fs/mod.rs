//! # File System Module
//!
//! File system modules handle interactions with directories and files.  The file system
//! takes ownership of a `BlockStore`, which it uses as storage.
//!
//! At present the only file system is the RT-11 style volume in `rt11`.  The directory
//! engine lives there, including the codecs it needs to read and write entries.

pub mod rt11;

/// Enumerates errors common to file systems
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("file system not compatible with request")]
    FileSystemMismatch
}
