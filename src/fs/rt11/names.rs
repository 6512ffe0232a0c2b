//! ## File names and patterns
//!
//! Names inside the image are `BASE.EXT` with at most 6 and 3 characters.
//! Patterns are matched one component at a time, so `*` never crosses the dot.

use log::{debug,error};
use super::types::Error;
use crate::DYNERR;

/// Form the image name for a host file name.  Any host directory is removed, then the
/// name is upper cased and cut to 6.3.  An empty base is an error.
pub fn normalize_name(host_name: &str) -> Result<String,DYNERR> {
    let leaf = match std::path::Path::new(host_name).file_name() {
        Some(s) => s.to_string_lossy().to_string(),
        None => host_name.to_string()
    };
    let upper = leaf.to_uppercase();
    let (base,ext) = match upper.split_once('.') {
        Some((b,e)) => (b.to_string(),e.to_string()),
        None => (upper.clone(),String::new())
    };
    let base: String = base.trim().chars().take(6).collect();
    let ext: String = ext.trim().chars().take(3).collect();
    if base.len()==0 {
        error!("`{}` has no base name",host_name);
        return Err(Box::new(Error::InvalidName));
    }
    debug!("host name {} becomes {}.{}",host_name,base,ext);
    Ok(match ext.len() {
        0 => base,
        _ => [base,ext].join(".")
    })
}

fn split(s: &str) -> (&str,&str) {
    match s.split_once('.') {
        Some((b,e)) => (b,e),
        None => (s,"")
    }
}

fn match_component(value: &str,pattern: &str) -> Result<bool,DYNERR> {
    if pattern.len()==0 || pattern=="*" {
        return Ok(true);
    }
    let matcher = globset::GlobBuilder::new(&pattern.to_uppercase())
        .literal_separator(true)
        .build()?
        .compile_matcher();
    Ok(matcher.is_match(value.to_uppercase()))
}

/// Match an image name against a `NAME.EXT` pattern, case insensitive.
/// An empty component in the pattern matches anything, so `FOO` matches `FOO.SAV`.
pub fn is_match(value: &str,pattern: &str) -> Result<bool,DYNERR> {
    let (vbase,vext) = split(value);
    let (pbase,pext) = split(pattern);
    Ok(match_component(vbase,pbase)? && match_component(vext,pext)?)
}

/// Does the pattern have any wildcards
pub fn is_wild(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}
