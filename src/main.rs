//! urbansas-filter CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = urbansas_filter::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
