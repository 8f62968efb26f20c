//! rAttendance main entrypoint.

use rattendance::{init_logging, run};

fn main() {
    init_logging();
    println!();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
