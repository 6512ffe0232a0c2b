use clap::ValueEnum;

include!("src/cli.rs");

const CATALOG_ALIASES: [&str;3] = ["ls","dir","cat"];

/// Value options get `+` so zsh accepts a separate value, and the `(catalog)` case is
/// repeated for each alias, which the generated script leaves without completions.
fn refine_zsh(script: &str) -> String {
    let eq_patt = regex::RegexBuilder::new(r"^'--(\w+)=\[").multi_line(true).build().expect("regex parsing error");
    let script = eq_patt.replace_all(script,"'--$1+[");
    let mut ans = String::new();
    let mut case_block: Option<String> = None;
    for line in script.lines() {
        match case_block.as_mut() {
            None if line=="(catalog)" => case_block = Some(format!("{}\n",line)),
            None => {
                ans.push_str(line);
                ans.push('\n');
            },
            Some(block) => {
                block.push_str(line);
                block.push('\n');
                if line==";;" {
                    ans.push_str(block);
                    for alias in CATALOG_ALIASES {
                        ans.push_str(&block.replace("(catalog)",&format!("({})",alias)));
                    }
                    case_block = None;
                }
            }
        }
    }
    ans
}

fn main() -> Result<(), std::io::Error> {
    if std::env::var("DOCS_RS").is_err() {
        let outdir = match std::env::var_os("CARGO_MANIFEST_DIR") {
            None => return Ok(()),
            Some(root) => std::path::Path::new(&root).join("completions"),
        };
        std::fs::create_dir_all(&outdir)?;

        let mut cmd = build_cli();

        for &shell in clap_complete::Shell::value_variants() {
            clap_complete::generate_to(shell, &mut cmd, "rt11kit", &outdir)?;
            match shell {
                clap_complete::Shell::Zsh => {
                    let s = std::fs::read(outdir.join("_rt11kit"))?;
                    let script = String::from_utf8_lossy(&s).to_string();
                    let refined = refine_zsh(&script);
                    std::fs::write(outdir.join("_rt11kit"),refined)?;
                },
                _ => {}
            }
        }
    }
    println!("cargo:rerun-if-changed=src/cli.rs");
    Ok(())
}
