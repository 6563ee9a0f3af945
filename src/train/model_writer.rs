use std::io::Write;

use crate::error::{Error, Result};
use crate::feature::FeatureFunction;
use crate::model::{CHUNK_SIZE, FUNCTION_SIZE, HEADER_SIZE, VERSION};

/// Write trained feature functions and weights
pub struct ModelWriter;

impl ModelWriter {
    /// Write a model in the binary weight format.
    ///
    /// The function list is written together with the weights since a weight
    /// index has no meaning without it.
    pub fn write<W: Write>(
        w: &mut W,
        functions: &[FeatureFunction],
        weights: &[f64],
        num_dims: usize,
        min_label: i32,
        max_label: i32,
    ) -> Result<()> {
        if functions.len() != weights.len() {
            return Err(Error::invalid_input(format!(
                "weights length ({}) must equal number of feature functions ({})",
                weights.len(),
                functions.len()
            )));
        }

        let num_functions = to_u32(functions.len(), "too many feature functions")?;
        let chunk_size = FUNCTION_SIZE
            .checked_mul(functions.len())
            .and_then(|n| n.checked_add(CHUNK_SIZE))
            .ok_or_else(|| Error::invalid_input("model too large"))?;
        let size = to_u32(HEADER_SIZE + chunk_size, "model too large")?;

        // Header
        w.write_all(b"lMXE")?;
        w.write_all(&size.to_le_bytes())?;
        w.write_all(b"IIS ")?;
        w.write_all(&VERSION.to_le_bytes())?;
        w.write_all(&num_functions.to_le_bytes())?;
        w.write_all(&to_u32(num_dims, "too many dimensions")?.to_le_bytes())?;
        w.write_all(&min_label.to_le_bytes())?;
        w.write_all(&max_label.to_le_bytes())?;
        w.write_all(&(HEADER_SIZE as u32).to_le_bytes())?;

        // Feature functions
        w.write_all(b"FUNC")?;
        w.write_all(&(chunk_size as u32).to_le_bytes())?;
        w.write_all(&num_functions.to_le_bytes())?;
        for (function, weight) in functions.iter().zip(weights) {
            let dim = to_u32(function.dimension, "too many dimensions")?;
            w.write_all(&dim.to_le_bytes())?;
            w.write_all(&function.value.to_le_bytes())?;
            w.write_all(&function.label.to_le_bytes())?;
            w.write_all(&weight.to_le_bytes())?;
        }
        Ok(())
    }
}

fn to_u32(n: usize, message: &str) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::invalid_input(message))
}
