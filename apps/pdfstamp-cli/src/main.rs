//! `stamp` - bounded-memory incremental PDF stamping
//!
//! Copies the input PDF verbatim into the output, then appends one
//! incremental update per batch of stamped pages. Diagnostics go to stderr;
//! the success line goes to stdout. Exit code is 0 on success, 1 on any
//! failure.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use pdfstamp_core::{stamp_file, StampOptions};
use tracing::warn;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pdfstamp_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: stamp <input.pdf> [pageSpec] [output.pdf] [text]");
        process::exit(1);
    }

    let input = PathBuf::from(&args[1]);
    let output = PathBuf::from(args.get(3).map(String::as_str).unwrap_or("stamped.pdf"));
    let opts = StampOptions {
        spec: args.get(2).cloned().unwrap_or_else(|| "all".into()),
        text: args.get(4).cloned().unwrap_or_else(|| "DRAFT".into()),
        ..Default::default()
    };

    let report = stamp_file(&input, &output, &opts)?;

    if !report.pages_skipped.is_empty() {
        warn!(pages = ?report.pages_skipped, "some pages could not be stamped");
    }
    println!(
        "wrote {} ({} of {} pages stamped, {} incremental updates)",
        output.display(),
        report.pages_stamped.len(),
        report.page_count,
        report.batches_flushed
    );
    Ok(())
}
