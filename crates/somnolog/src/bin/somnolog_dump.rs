//! `somnolog-dump`: decode a quoted base64 payload (stdin) to export rows.
//!
//! Usage:
//!   somnolog-dump [--format type1|type2] [--tz <hours>] [--reverse]
//!
//! Rows carry endpoint timestamps at the viewing offset (default UTC),
//! the treatment and leakage counters, and the source token.

use somnolog::cli::{dump_rows, CliError};
use std::io::{self, Read};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse --format, --tz and --reverse flags.
    let mut format = "type1".to_string();
    let mut tz_hours = 0.0f64;
    let mut newest_first = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                i += 1;
                if let Some(f) = args.get(i) {
                    format = f.clone();
                }
            }
            "--tz" => {
                i += 1;
                if let Some(v) = args.get(i) {
                    match v.parse::<f64>() {
                        Ok(h) => tz_hours = h,
                        Err(e) => {
                            eprintln!("{e}");
                            std::process::exit(1);
                        }
                    }
                }
            }
            "--reverse" => {
                newest_first = true;
            }
            _ => {}
        }
        i += 1;
    }

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match dump_rows(buf.trim(), newest_first, &format, tz_hours) {
        Ok(rows) => println!("{rows}"),
        Err(CliError::UnknownLayout(f)) => {
            eprintln!("Unknown layout: {f}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
