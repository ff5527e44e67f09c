use std::path::PathBuf;

use clap::Parser;

/// Ensure a minimum amount of free disk space before a build proceeds.
///
/// Measures the free space on the root filesystem and, when it falls short
/// of the requested amount, deletes a fixed list of large pre-installed
/// toolchain directories to reclaim space.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Minimum desired free space on the probed filesystem, in MB.
    pub desired_space_mb: u64,

    /// Specify the filesystem path which should be probed for free space.
    /// Note: This can be a relative path.
    #[arg(short, long, default_value = "/", verbatim_doc_comment)]
    pub root: PathBuf,

    /// Issue a global filesystem sync after the run.
    /// Purely diagnostic; a failing sync never changes the outcome.
    #[arg(long, verbatim_doc_comment)]
    pub sync: bool,
}
