//! Files command - list Word documents available for import.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;

use super::load_config;

/// Arguments for the files command.
#[derive(Args)]
pub struct FilesArgs {
    /// Directory to list (default: configured inbox)
    #[arg(short, long)]
    dir: Option<PathBuf>,
}

pub async fn run(args: FilesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let dir = args.dir.unwrap_or_else(|| config.paths.inbox_dir.clone());

    let files = list_documents(&dir)?;

    if files.is_empty() {
        println!(
            "{} No .docx files in {}",
            style("ℹ").blue(),
            dir.display()
        );
        return Ok(());
    }

    for file in &files {
        println!("{}", file);
    }

    println!();
    println!("Run 'facturi import <name>' to import one of them.");

    Ok(())
}

/// Names of the `.docx` files in `dir`, sorted.
pub fn list_documents(dir: &Path) -> anyhow::Result<Vec<String>> {
    if !dir.is_dir() {
        anyhow::bail!("Directory not found: {}", dir.display());
    }

    let mut files: Vec<String> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(".docx"))
        .collect();

    files.sort();
    Ok(files)
}
