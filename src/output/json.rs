//! JSON output

use std::io;

use crate::stats::ScanSummary;
use crate::tree::ScanResult;

/// Print the digest of `result` as pretty JSON on stdout.
pub fn print_json(result: &ScanResult) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&ScanSummary::new(result)).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
