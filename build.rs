// Generates the man page and shell completions from the clap definitions.

use clap::CommandFactory;
use clap_complete::{Shell, generate_to};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

#[allow(dead_code)]
mod cli {
    include!("src/cli.rs");
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = match env::var_os("OUT_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => return Ok(()),
    };

    let mut cmd = cli::Cli::command();

    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut buffer)?;
    fs::write(out_dir.join("phonequote.1"), buffer)?;

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, "phonequote", &out_dir)?;
    }

    Ok(())
}
