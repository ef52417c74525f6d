//! Shaforge CLI
//!
//! Brute-forces a nonce that steers a git commit's SHA-1 digest to a
//! chosen prefix.
//!
//! # Commands
//!
//! - `search` - Find a nonce for a commit body read from a file or stdin
//! - `benchmark` - Measure single-thread digest throughput

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use shaforge::{engine, CommitObject, DigestPrefix, SearchRequest};

#[derive(Parser)]
#[command(name = "shaforge")]
#[command(version = "0.1.0")]
#[command(about = "Brute-force a git commit whose SHA-1 starts with a chosen prefix")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a nonce matching the given digest prefix
    Search {
        /// Target digest prefix in hex; an odd number of digits
        /// constrains the trailing half digit
        prefix: String,

        /// Commit body file (default: read from stdin)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of worker threads (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Write the winning commit object to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a single-thread digest throughput benchmark
    Benchmark {
        /// Number of digests to compute
        #[arg(short, long, default_value = "1000000")]
        count: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            prefix,
            file,
            threads,
            output,
        } => cmd_search(&prefix, file, threads, output),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_search(
    prefix: &str,
    file: Option<PathBuf>,
    threads: Option<usize>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let prefix = DigestPrefix::from_hex(prefix)?;

    let content = match file {
        Some(path) => fs::read(&path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let workers = threads.unwrap_or_else(num_cpus::get);
    println!("Searching with {} workers...", workers);

    let start = Instant::now();
    let found = SearchRequest::new(content, prefix, workers)?.run()?;
    let elapsed = start.elapsed();

    let nonce = &found.object[found.object.len() - engine::NONCE_LEN..];

    println!("\nFound matching object!");
    println!("Digest: {}", hex::encode(found.digest));
    println!("Nonce:  {}", String::from_utf8_lossy(nonce));
    println!("Time:   {:.2}s", elapsed.as_secs_f64());

    if let Some(path) = output {
        fs::write(&path, &found.object)?;
        println!("Object written to {}", path.display());
    }

    Ok(())
}

fn cmd_benchmark(count: u64) -> anyhow::Result<()> {
    println!("Running benchmark with {} digests...", count);

    let mut object = CommitObject::build(
        b"tree 0123456789abcdef0123456789abcdef01234567\n\
          author A <a@x> 0 +0000\n\
          committer A <a@x> 0 +0000\n\
          \n\
          benchmark body",
    );

    let start = Instant::now();
    for counter in 0..count {
        object.write_nonce(counter);
        std::hint::black_box(object.digest());
    }
    let elapsed = start.elapsed();
    let rate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total digests: {}", count);
    println!("  Time elapsed:  {:.2}s", elapsed.as_secs_f64());
    println!("  Rate:          {:.0} H/s", rate);

    Ok(())
}
