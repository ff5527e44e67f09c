use std::process::{exit, Command};

use anyhow::Context;
use args::Args;
use clap::Parser;
use freeup::RECLAIM_TARGETS;
use output::GithubOutput;

mod args;
mod output;

fn main() -> anyhow::Result<()> {
    let args = parse_args();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    /* Resolve the output sink before any disk work; a misconfigured
     * environment must fail regardless of the free space outcome. */
    let output = GithubOutput::from_env()?;

    let root = dunce::canonicalize(&args.root)
        .with_context(|| format!("Invalid root path {}", args.root.display()))?;
    log::debug!("Root path: {}", root.display());

    let available_mb = freeup::ensure_available(&root, args.desired_space_mb, RECLAIM_TARGETS)?;

    if args.sync {
        sync_filesystems();
    }

    output.append("available-space", available_mb)?;

    if available_mb < args.desired_space_mb {
        log::error!(
            "Available space {} MB is less than desired {} MB",
            available_mb,
            args.desired_space_mb
        );
        exit(1);
    }

    Ok(())
}

/// Parse the command line, terminating with code 2 on a usage error.
fn parse_args() -> Args {
    Args::try_parse().unwrap_or_else(|error| {
        if error.use_stderr() {
            println!("{}", error);
            exit(2);
        }

        /* --help and --version land here */
        let _ = error.print();
        exit(0);
    })
}

fn sync_filesystems() {
    log::info!("Global filesystem sync");
    match Command::new("sync").status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("sync exited with {}", status),
        Err(error) => log::warn!("Failed to run sync: {:#}", error),
    }
}
