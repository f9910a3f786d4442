//! # Block Lab Entry Point
//!
//! Runs the headless demo loop from the library.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

use log::error;

fn main() {
    if let Err(err) = block_lab::run() {
        error!("{err}");
        std::process::exit(1);
    }
}
