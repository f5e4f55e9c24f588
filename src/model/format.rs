use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, ModelLoadError};
use crate::model::ModelArtifact;

/// On-disk encoding of a [`ModelArtifact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `.json`
    Json,
    /// `.cbor`
    Cbor,
}

impl ArtifactFormat {
    /// pick the encoding from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(ArtifactFormat::Json),
            Some("cbor") => Ok(ArtifactFormat::Cbor),
            _ => Err(ModelLoadError::UnsupportedFormat { path: path.to_path_buf() }),
        }
    }

    pub fn read<R: Read>(self, reader: R) -> Result<ModelArtifact, ModelLoadError> {
        match self {
            ArtifactFormat::Json => serde_json::from_reader(reader).map_err(ModelLoadError::decode),
            ArtifactFormat::Cbor => serde_cbor::from_reader(reader).map_err(ModelLoadError::decode),
        }
    }

    pub fn write<W: Write>(self, artifact: &ModelArtifact, writer: W) -> Result<(), Error> {
        match self {
            ArtifactFormat::Json => {
                serde_json::to_writer(writer, artifact).map_err(|e| Error::Encode(e.to_string()))
            }
            ArtifactFormat::Cbor => {
                serde_cbor::to_writer(writer, artifact).map_err(|e| Error::Encode(e.to_string()))
            }
        }
    }
}
