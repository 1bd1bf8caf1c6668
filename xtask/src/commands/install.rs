use std::fs;
use std::path::PathBuf;
use std::process::Command;

use clap::Args;

#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Installation directory (default: ~/.bin)
    #[arg(long = "bin-dir")]
    pub bin_dir: Option<PathBuf>,
}

pub fn cmd_install(args: InstallArgs) -> Result<(), String> {
    let bin_dir = match args.bin_dir {
        Some(dir) => dir,
        None => std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| "could not determine home directory".to_string())?
            .join(".bin"),
    };
    fs::create_dir_all(&bin_dir).map_err(|e| format!("{}: {e}", bin_dir.display()))?;

    let root = crate::workspace_root();
    let status = Command::new("cargo")
        .args(["build", "--release", "-p", "bumplog"])
        .current_dir(&root)
        .status()
        .map_err(|e| format!("run cargo build: {e}"))?;
    if !status.success() {
        return Err("cargo build failed".to_string());
    }

    let source = root.join("target").join("release").join("bumplog");
    let dest = bin_dir.join("bumplog");
    fs::copy(&source, &dest).map_err(|e| format!("{}: {e}", dest.display()))?;
    println!("installed {}", dest.display());

    Ok(())
}
