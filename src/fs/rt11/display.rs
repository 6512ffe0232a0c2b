use colored::Colorize;
use super::chain::Directory;
use super::directory::HomeBlock;
use super::types::{CatalogOptions,EntryKind,E_PROT,E_READ};
use super::date;

const UNUSED: &str = "< UNUSED >";

fn flags(status: u16) -> String {
    let mut ans = String::new();
    if status & E_PROT > 0 {
        ans.push('P');
    }
    if status & E_READ > 0 {
        ans.push('R');
    }
    ans
}

pub fn catalog(dir: &Directory,label: &str,opt: &CatalogOptions) {
    if opt.brief {
        for e in &dir.entries {
            if e.entry.is_permanent() {
                println!("{}",e.entry.name());
            } else if opt.empty && e.entry.is_free() {
                println!("{}",UNUSED);
            }
        }
        return;
    }
    println!();
    println!("Directory of {}",label);
    println!();
    for e in &dir.entries {
        match e.entry.kind() {
            EntryKind::Permanent => {
                println!("{:10} {:>6}{:2} {}  {:>6}",
                    e.entry.name().bold(),
                    e.entry.length,
                    flags(e.entry.status),
                    date::display(e.entry.date()),
                    e.start);
            },
            EntryKind::Empty if opt.empty && e.entry.is_free() => {
                println!("{:10} {:>6}   {}  {:>6}",
                    UNUSED.dimmed(),
                    e.entry.length,
                    date::display(0),
                    e.start);
            },
            _ => {}
        }
    }
    println!();
    println!(" {} Files, {} Blocks",dir.files().count(),dir.used_blocks());
    println!(" {} Free blocks",dir.free_blocks());
    if let Some(msg) = &dir.fault {
        println!(" {} {}","?DIR-W-".red(),msg);
    }
    println!();
}

pub fn bad_block_table(home: &HomeBlock) {
    println!("first directory block: {}",home.dir_block());
    println!("pack cluster size: {}",home.pack_cluster);
    println!("system version: {}",hex::encode_upper(u16::to_be_bytes(home.system_version)));
    let table = home.bad_blocks();
    if table.len()==0 {
        println!("no bad blocks");
        return;
    }
    println!("{:>8} {:>6}","block".bold(),"count".bold());
    for b in table {
        println!("{:>8} {:>6}",b.block,b.count);
    }
}
