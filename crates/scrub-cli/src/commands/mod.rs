pub mod extract;
pub mod mask;
pub mod repair;
pub mod scan;

use anyhow::Result;
use std::io::Read;
use std::path::PathBuf;

/// Read the input file, or stdin when none is given.
pub fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
