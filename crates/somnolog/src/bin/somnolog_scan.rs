//! `somnolog-scan`: scan a quoted base64 payload (stdin) for stream defects.
//!
//! Usage:
//!   somnolog-scan [--reverse]
//!
//! Prints a JSON report with the corrected record count, the per-kind
//! defect counts, and the overall clean flag. `--reverse` marks the
//! payload as newest-first.

use somnolog::cli::scan_report;
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse the --reverse flag.
    let mut newest_first = false;
    let mut i = 1;
    while i < args.len() {
        if args[i].as_str() == "--reverse" {
            newest_first = true;
        }
        i += 1;
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match scan_report(buf.trim(), newest_first) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
