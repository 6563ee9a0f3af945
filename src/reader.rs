//! Reader for the plain-text training data format.
//!
//! One instance per line, tokens separated by whitespace:
//!
//! ```text
//! c1 f01 f10 f21 f31
//! ```
//!
//! The last character of the first token is the label and the last character
//! of every following token is the value of the next feature dimension. Both
//! are single decimal digits; the rest of each token is a free-form name.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::dataset::Instance;
use crate::error::{Error, Result};

/// Read instances from a buffered reader
pub fn read_instances<R: BufRead>(reader: R) -> Result<Vec<Instance>> {
    let mut instances = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(instance) = parse_line(&line, i + 1)? {
            instances.push(instance);
        }
    }
    Ok(instances)
}

/// Read instances from a file
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<Instance>> {
    let file = File::open(path)?;
    read_instances(BufReader::new(file))
}

fn parse_line(line: &str, lineno: usize) -> Result<Option<Instance>> {
    let mut tokens = line.split_whitespace();
    let label = match tokens.next() {
        Some(token) => trailing_digit(token, lineno)?,
        None => return Ok(None),
    };
    let values = tokens
        .map(|token| trailing_digit(token, lineno))
        .collect::<Result<Vec<u32>>>()?;
    Ok(Some(Instance::new(label as i32, values)))
}

fn trailing_digit(token: &str, lineno: usize) -> Result<u32> {
    token
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| Error::Parse {
            line: lineno,
            message: format!("token `{}` does not end with a digit", token),
        })
}
