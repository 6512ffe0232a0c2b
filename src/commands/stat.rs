use clap;
use std::path::Path;
use super::RCH;
use crate::fs::rt11::types::CatalogOptions;
use crate::STDRESULT;

pub fn stat(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = crate::open_volume(Path::new(img_path),false)?;
    println!("{}",disk.stat(cmd.get_one::<u16>("indent").copied())?);
    return Ok(());
}

pub fn catalog(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = crate::open_volume(Path::new(img_path),false)?;
    let opt = CatalogOptions {
        brief: cmd.get_flag("brief"),
        empty: cmd.get_flag("empty")
    };
    disk.catalog_to_stdout(img_path,&opt)
}

pub fn badblocks(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = crate::open_volume(Path::new(img_path),false)?;
    disk.bad_blocks_to_stdout()
}

pub fn glob(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let mut disk = crate::open_volume(Path::new(img_path),false)?;
    let v = disk.glob(cmd.get_one::<String>("file").expect(RCH))?;
    let mut obj = json::array![];
    for m in v {
        obj.push(m)?;
    }
    let s = match cmd.get_one::<u16>("indent") {
        Some(spaces) => json::stringify_pretty(obj, *spaces),
        None => json::stringify(obj)
    };
    println!("{}",s);
    return Ok(());
}
