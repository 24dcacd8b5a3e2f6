use thiserror::Error;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("failed to load program: {0}")]
    Io(#[from] io::Error),

    #[error("invalid program image: {0} bytes is not a whole number of instruction words")]
    Ragged(usize),
}

/// A validated program image: a stream of big-endian instruction words.
pub struct Image {
    data: Box<[u8]>,
}

impl Image {
    /// Load an image from a file. The file's length must be a multiple of the four-byte
    /// word size.
    pub fn from_file(path: &Path) -> Result<Self, ImageError> {
        let mut file = File::open(path)?;
        let mut data = Vec::new();

        file.read_to_end(&mut data)?;

        Self::from_bytes(data)
    }

    /// Validate an in-memory image.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, ImageError> {
        if data.len() % 4 != 0 {
            return Err(ImageError::Ragged(data.len()));
        }
        Ok(Self { data: data.into_boxed_slice() })
    }

    /// Number of instruction words in the image.
    pub fn word_count(&self) -> u32 {
        (self.data.len() / 4) as u32
    }

    /// The raw big-endian byte stream.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}
