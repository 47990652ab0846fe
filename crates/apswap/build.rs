use std::fs;
use std::path::Path;

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;

// cli.rs only needs clap and clap_complete, both build-dependencies.
#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        panic!("OUT_DIR not set by Cargo");
    };
    let out_dir = Path::new(&out_dir);

    let mut cmd = cli::Cli::command();
    cmd.build();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap_or_else(|e| panic!("create {}: {e}", man_dir.display()));
    write_man_page(&cmd, &cmd.get_name().to_owned(), &man_dir);
    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let page = format!("{}-{}", cmd.get_name(), sub.get_name());
        write_man_page(sub, &page, &man_dir);
    }

    let completions_dir = out_dir.join("completions");
    fs::create_dir_all(&completions_dir)
        .unwrap_or_else(|e| panic!("create {}: {e}", completions_dir.display()));
    for shell in Shell::value_variants() {
        clap_complete::generate_to(*shell, &mut cmd, "apswap", &completions_dir)
            .unwrap_or_else(|e| panic!("{shell} completions: {e}"));
    }
}

/// `<page>.1` for `cmd` under `dir`.
fn write_man_page(cmd: &clap::Command, page: &str, dir: &Path) {
    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone().name(page.to_owned()))
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("render man page {page}: {e}"));

    let path = dir.join(format!("{page}.1"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
}
