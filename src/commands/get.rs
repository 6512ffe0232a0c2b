//! # Provide the `get` subcommand
//!
//! Files matching a pattern are copied out of the disk image into a host directory.
//! RT-11 keeps no byte count, so every file comes out as whole blocks.

use clap;
use std::io::Write;
use std::path::{Path,PathBuf};
use log::{info,warn,error};
use super::{CommandError,RCH};
use crate::fs::rt11::{Disk,names};
use crate::fs::rt11::chain::DirEntry;
use crate::fs::rt11::types::{Error,ExportOptions};
use crate::STDRESULT;

/// A destination ending in a wildcard, such as `out/*.*`, means the directory `out`
fn destination_dir(to: &str) -> PathBuf {
    let p = PathBuf::from(to);
    match p.file_name() {
        Some(leaf) if names::is_wild(&leaf.to_string_lossy()) => match p.parent() {
            Some(par) if par.as_os_str().len() > 0 => par.to_path_buf(),
            _ => PathBuf::from(".")
        },
        _ => p
    }
}

fn export(disk: &mut Disk,files: &[DirEntry],dest: &Path,opt: &ExportOptions) -> STDRESULT {
    for e in files {
        let name = e.entry.name();
        let host = dest.join(&name);
        if opt.no_replace && host.exists() {
            warn!("skipping {}, already exists",host.display());
            continue;
        }
        let dat = disk.read_entry(e)?;
        std::fs::write(&host,&dat)?;
        info!("copy {} -> {}",name,host.display());
    }
    Ok(())
}

pub fn get(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let pattern = cmd.get_one::<String>("file").expect(RCH);
    let mut disk = crate::open_volume(Path::new(img_path),false)?;
    let files = disk.matching_files(pattern)?;
    if files.len()==0 {
        error!("no files match {}",pattern);
        return Err(Box::new(Error::NoFile));
    }
    if cmd.get_flag("stdout") {
        if files.len() > 1 {
            error!("{} files match {}, stdout takes only one",files.len(),pattern);
            return Err(Box::new(CommandError::InvalidCommand));
        }
        let dat = disk.read_entry(&files[0])?;
        if atty::is(atty::Stream::Stdout) {
            crate::display_block(0,&dat);
        } else {
            std::io::stdout().write_all(&dat)?;
        }
        return Ok(());
    }
    let dest = destination_dir(cmd.get_one::<String>("to").expect(RCH));
    if !dest.is_dir() {
        error!("destination {} is not a directory",dest.display());
        return Err(Box::new(CommandError::FileNotFound));
    }
    let opt = ExportOptions {
        no_replace: cmd.get_flag("noreplace")
    };
    export(&mut disk,&files,&dest,&opt)
}

#[test]
fn wildcard_destination() {
    assert_eq!(destination_dir("out/*.*"),PathBuf::from("out"));
    assert_eq!(destination_dir("*.*"),PathBuf::from("."));
    assert_eq!(destination_dir("out"),PathBuf::from("out"));
}
