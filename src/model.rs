use std::io::Write;

use crate::classifier::Classifier;
use crate::error::{Error, Result};
use crate::feature::FeatureFunction;

pub(crate) const HEADER_SIZE: usize = 36;
pub(crate) const CHUNK_SIZE: usize = 12;
pub(crate) const FUNCTION_SIZE: usize = 20;
pub(crate) const VERSION: u32 = 100;

#[inline]
fn unpack_u32(buf: &[u8]) -> Result<u32> {
    if buf.len() < 4 {
        return Err(Error::invalid_model("not enough data for unpacking u32"));
    }
    Ok(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]))
}

#[inline]
fn unpack_i32(buf: &[u8]) -> Result<i32> {
    unpack_u32(buf).map(|v| v as i32)
}

#[inline]
fn unpack_f64(buf: &[u8]) -> Result<f64> {
    if buf.len() < 8 {
        return Err(Error::invalid_model("not enough data for unpacking f64"));
    }
    Ok(f64::from_le_bytes([
        buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
    ]))
}

#[derive(Debug, Clone)]
struct Header {
    magic: [u8; 4],
    size: u32,
    r#type: [u8; 4],
    version: u32,
    num_functions: u32,
    num_dims: u32,
    min_label: i32,
    max_label: i32,
    off_functions: u32,
}

/// A trained model loaded from its binary weight file
#[derive(Debug, Clone)]
pub struct Model {
    header: Header,
    functions: Vec<FeatureFunction>,
    weights: Vec<f64>,
}

impl Model {
    /// Create an instance of a model object from a model in memory
    pub fn new(buf: &[u8]) -> Result<Self> {
        let size = buf.len();
        if size < HEADER_SIZE {
            return Err(Error::invalid_model("invalid model format"));
        }
        let magic = &buf[0..4];
        if magic != b"lMXE" {
            return Err(Error::invalid_model("invalid file format, magic mismatch"));
        }
        let header = Header {
            magic: [buf[0], buf[1], buf[2], buf[3]],
            size: unpack_u32(&buf[4..])?,
            r#type: [buf[8], buf[9], buf[10], buf[11]],
            version: unpack_u32(&buf[12..])?,
            num_functions: unpack_u32(&buf[16..])?,
            num_dims: unpack_u32(&buf[20..])?,
            min_label: unpack_i32(&buf[24..])?,
            max_label: unpack_i32(&buf[28..])?,
            off_functions: unpack_u32(&buf[32..])?,
        };
        if header.size as usize != size {
            return Err(Error::invalid_model(format!(
                "size mismatch, header says {} bytes but got {}",
                header.size, size
            )));
        }
        if &header.r#type != b"IIS " {
            return Err(Error::invalid_model("unsupported model type"));
        }
        if header.version != VERSION {
            return Err(Error::invalid_model(format!(
                "unsupported version {}",
                header.version
            )));
        }
        if header.min_label > header.max_label {
            return Err(Error::invalid_model("empty label range"));
        }

        let mut index = header.off_functions as usize;
        if buf.len() < index + CHUNK_SIZE || &buf[index..index + 4] != b"FUNC" {
            return Err(Error::invalid_model("missing feature function chunk"));
        }
        index += 8;
        let num_functions = unpack_u32(&buf[index..])?;
        index += 4;
        if num_functions != header.num_functions {
            return Err(Error::invalid_model("feature function count mismatch"));
        }
        let needed = (num_functions as usize)
            .checked_mul(FUNCTION_SIZE)
            .and_then(|n| n.checked_add(index));
        if needed.map_or(true, |n| n > size) {
            return Err(Error::invalid_model("truncated feature function chunk"));
        }

        let mut functions = Vec::with_capacity(num_functions as usize);
        let mut weights = Vec::with_capacity(num_functions as usize);
        for _ in 0..num_functions {
            let dimension = unpack_u32(&buf[index..])?;
            let value = unpack_u32(&buf[index + 4..])?;
            let label = unpack_i32(&buf[index + 8..])?;
            let weight = unpack_f64(&buf[index + 12..])?;
            index += FUNCTION_SIZE;
            if dimension >= header.num_dims
                || label < header.min_label
                || label > header.max_label
            {
                return Err(Error::invalid_model(format!(
                    "feature function ({}, {}, {}) out of range",
                    dimension, value, label
                )));
            }
            functions.push(FeatureFunction::new(dimension as usize, value, label));
            weights.push(weight);
        }

        Ok(Self {
            header,
            functions,
            weights,
        })
    }

    /// Number of feature functions
    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    /// Number of feature dimensions
    pub fn num_dims(&self) -> usize {
        self.header.num_dims as usize
    }

    pub fn min_label(&self) -> i32 {
        self.header.min_label
    }

    pub fn max_label(&self) -> i32 {
        self.header.max_label
    }

    pub fn functions(&self) -> &[FeatureFunction] {
        &self.functions
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Get a new classifier
    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(
            &self.functions,
            &self.weights,
            self.header.min_label,
            self.header.max_label,
        )
    }

    /// Print the model in human-readable format
    pub fn dump<W: Write>(&self, w: &mut W) -> Result<()> {
        let header = &self.header;
        writeln!(w, "FILEHEADER = {{")?;
        writeln!(w, "  magic: {}", String::from_utf8_lossy(&header.magic))?;
        writeln!(w, "  size: {}", header.size)?;
        writeln!(
            w,
            "  type: {}",
            String::from_utf8_lossy(&header.r#type).trim_end()
        )?;
        writeln!(w, "  version: {}", header.version)?;
        writeln!(w, "  num_functions: {}", header.num_functions)?;
        writeln!(w, "  num_dims: {}", header.num_dims)?;
        writeln!(w, "  min_label: {}", header.min_label)?;
        writeln!(w, "  max_label: {}", header.max_label)?;
        writeln!(w, "  off_functions: {:#X}", header.off_functions)?;
        writeln!(w, "}}\n")?;
        writeln!(w, "FUNCTIONS = {{")?;
        for (function, weight) in self.functions.iter().zip(&self.weights) {
            writeln!(
                w,
                "  (f{}={}) --> {}: {:.6}",
                function.dimension, function.value, function.label, weight
            )?;
        }
        writeln!(w, "}}\n")?;
        Ok(())
    }
}
