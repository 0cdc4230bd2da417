//! Implementation of `bibq keywords`.

use std::process::ExitCode;

use bibq_query::{NESTABLE_KEYWORDS, SPIRES_KEYWORDS};

use crate::cli::exit_codes;

/// Prints the SPIRES mnemonic table.
pub fn run() -> ExitCode {
    let width = SPIRES_KEYWORDS
        .iter()
        .map(|(mnemonic, _)| mnemonic.len())
        .max()
        .unwrap_or(0);
    for (mnemonic, canonical) in SPIRES_KEYWORDS {
        let nestable = if NESTABLE_KEYWORDS.contains(mnemonic) {
            "  (nestable)"
        } else {
            ""
        };
        println!("{mnemonic:width$}  {canonical}{nestable}");
    }
    exit_codes::OK
}
