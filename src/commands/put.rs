//! # Provide the `put` subcommand
//!
//! Host files are selected with a path or a glob pattern, and each one is allocated on
//! the volume under its 6.3 name.

use clap;
use std::path::{Path,PathBuf};
use log::{info,error};
use super::{CommandError,RCH};
use crate::fs::rt11::{date,names};
use crate::fs::rt11::types::ImportOptions;
use crate::{STDRESULT,DYNERR};

/// Regular files named by a path or pattern, matching is case insensitive
fn host_files(pattern: &str) -> Result<Vec<PathBuf>,DYNERR> {
    if !names::is_wild(pattern) {
        let p = PathBuf::from(pattern);
        if !p.is_file() {
            error!("{} does not exist",pattern);
            return Err(Box::new(CommandError::FileNotFound));
        }
        return Ok(vec![p]);
    }
    let opt = glob::MatchOptions {
        case_sensitive: false,
        require_literal_separator: true,
        require_literal_leading_dot: false
    };
    let mut ans = Vec::new();
    for entry in glob::glob_with(pattern,opt)? {
        let p = entry?;
        if p.is_file() {
            ans.push(p);
        }
    }
    if ans.len()==0 {
        error!("no host files match {}",pattern);
        return Err(Box::new(CommandError::FileNotFound));
    }
    Ok(ans)
}

pub fn put(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let pattern = cmd.get_one::<String>("file").expect(RCH);
    let opt = ImportOptions {
        no_replace: cmd.get_flag("noreplace"),
        date: match cmd.get_one::<String>("date") {
            Some(s) => Some(date::parse(s)?),
            None => None
        }
    };
    let sources = host_files(pattern)?;
    let mut disk = crate::open_volume(Path::new(img_path),true)?;
    for src in sources {
        let dat = std::fs::read(&src)?;
        let host_name = src.to_string_lossy().to_string();
        if let Some(p) = disk.import(&host_name,&dat,&opt)? {
            info!("copy {} -> {} ({} blocks at {})",src.display(),names::normalize_name(&host_name)?,p.length,p.start);
        }
    }
    Ok(())
}
