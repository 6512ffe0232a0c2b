use clap;
use std::io::Write;
use std::path::Path;
use super::RCH;
use crate::STDRESULT;

/// Display a block, raw bytes go out if stdout is not a terminal
pub fn dump(cmd: &clap::ArgMatches) -> STDRESULT {
    let img_path = cmd.get_one::<String>("dimg").expect(RCH);
    let iblock = *cmd.get_one::<usize>("block").expect(RCH);
    let mut disk = crate::open_volume(Path::new(img_path),false)?;
    let dat = disk.read_block(iblock)?;
    if !atty::is(atty::Stream::Stdout) && !cmd.get_flag("words") {
        std::io::stdout().write_all(&dat)?;
        return Ok(());
    }
    match cmd.get_flag("words") {
        true => crate::display_words(iblock*dat.len(),&dat),
        false => crate::display_block(iblock*dat.len(),&dat)
    }
    Ok(())
}
