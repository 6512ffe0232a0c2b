use clap::{value_parser, crate_version, Arg, ArgAction, Command, ValueHint};

const PATTERN_HELP: &str = "Patterns are NAME.EXT with `*` and `?` wildcards, matched without regard to case.
Each component is matched separately, an omitted extension matches any extension.";
const DATE_HELP: &str = "Date in the form dd-MMM-yy, e.g. 15-Jan-97.
Years 72 through 99 are in the 1900s, others are in the 2000s.
The earliest date is 1972 and the latest is 2099.";

fn dimg_arg() -> Arg {
    Arg::new("dimg").short('d').long("dimg").help("path to disk image itself")
        .value_name("PATH")
        .value_hint(ValueHint::FilePath)
        .required(true)
}

fn indent_arg() -> Arg {
    Arg::new("indent").long("indent").help("JSON indentation, omit to minify")
        .value_name("SPACES")
        .value_parser(value_parser!(u16).range(0..16))
        .required(false)
}

fn noreplace_arg(help: &'static str) -> Arg {
    Arg::new("noreplace").long("noreplace").help(help)
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    let long_help = "rt11kit is always invoked with exactly one of several subcommands.
Set RUST_LOG environment variable to control logging level.
  levels: trace,debug,info,warn,error

Examples:
---------
list files:            `rt11kit catalog -d disk.dsk`
include free space:    `rt11kit catalog -e -d disk.dsk`
copy files out:        `rt11kit get -f *.mac -o ./src -d disk.dsk`
copy one to stdout:    `rt11kit get -f hello.txt --stdout -d disk.dsk`
copy files in:         `rt11kit put -f ./src/*.mac --date 15-jan-97 -d disk.dsk`";

    let mut main_cmd = Command::new("rt11kit")
        .about("Manipulates RT-11 style disk images.")
        .after_long_help(long_help)
        .version(crate_version!());

    main_cmd = main_cmd.subcommand(
        Command::new("catalog")
            .arg(dimg_arg())
            .arg(Arg::new("brief").short('b').long("brief").help("list names only")
                .action(ArgAction::SetTrue))
            .arg(Arg::new("empty").short('e').long("empty").help("include free regions")
                .action(ArgAction::SetTrue))
            .visible_alias("ls")
            .visible_alias("dir")
            .visible_alias("cat")
            .about("write disk image catalog to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("badblocks")
            .arg(dimg_arg())
            .about("write the home block's bad block table to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("stat")
            .arg(dimg_arg())
            .arg(indent_arg())
            .about("write volume statistics as JSON to stdout"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("glob")
            .arg(dimg_arg())
            .arg(Arg::new("file").short('f').long("file").help("file name pattern")
                .value_name("PATTERN")
                .required(true))
            .arg(indent_arg())
            .about("write JSON list of matching file names")
            .after_help(PATTERN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("get")
            .arg(dimg_arg())
            .arg(Arg::new("file").short('f').long("file").help("file name pattern")
                .value_name("PATTERN")
                .default_value("*.*"))
            .arg(Arg::new("to").short('o').long("to").help("host directory to receive the files")
                .value_name("DIR")
                .value_hint(ValueHint::DirPath)
                .default_value(".")
                .conflicts_with("stdout"))
            .arg(Arg::new("stdout").long("stdout").help("write the single matching file to stdout")
                .action(ArgAction::SetTrue))
            .arg(noreplace_arg("do not overwrite files on the host"))
            .about("copy files from the disk image to the host")
            .after_help(PATTERN_HELP),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("put")
            .arg(dimg_arg())
            .arg(Arg::new("file").short('f').long("file").help("host file path or pattern")
                .value_name("PATTERN")
                .value_hint(ValueHint::FilePath)
                .required(true))
            .arg(Arg::new("date").long("date").help("creation date to stamp")
                .value_name("DATE")
                .long_help(DATE_HELP))
            .arg(noreplace_arg("skip files already in the directory"))
            .about("copy files from the host to the disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("dump")
            .arg(dimg_arg())
            .arg(Arg::new("block").short('b').long("block").help("block number")
                .value_name("BLOCK")
                .value_parser(value_parser!(usize))
                .required(true))
            .arg(Arg::new("words").short('w').long("words").help("show octal words and RAD-50")
                .action(ArgAction::SetTrue))
            .about("display one block of the disk image"),
    );
    main_cmd = main_cmd.subcommand(
        Command::new("completions")
            .arg(Arg::new("shell").short('s').long("shell").help("shell type")
                .value_name("SHELL")
                .value_parser(["bash", "elv", "fish", "ps1", "zsh"])
                .required(true))
            .about("write completions script to stdout"),
    );
    main_cmd
}
