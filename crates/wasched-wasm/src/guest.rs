use std::{fs, path::PathBuf};

use tracing::trace;

use crate::error::WasmError;

/// WebAssembly binary magic and version 1.
const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];
const WASM_HEADER_LEN: usize = 8;

/// Where a guest module is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuestSource {
    /// Local file, from `file://<path>` or a bare path.
    File(PathBuf),
}

impl GuestSource {
    /// Parse a `guestURL`.
    ///
    /// `http://` and `https://` guests are rejected, as is any other scheme.
    pub fn parse(url: &str) -> Result<Self, WasmError> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(GuestSource::File(PathBuf::from(path)));
        }
        if url.contains("://") {
            return Err(WasmError::UnsupportedScheme(url.to_string()));
        }
        Ok(GuestSource::File(PathBuf::from(url)))
    }

    /// Read the guest and check its module header.
    pub fn load(&self) -> Result<Vec<u8>, WasmError> {
        let GuestSource::File(path) = self;
        let bytes = fs::read(path).map_err(|source| WasmError::Io {
            path: path.clone(),
            source,
        })?;
        trace!(path = %path.display(), len = bytes.len(), "guest read");

        if bytes.len() < WASM_HEADER_LEN {
            return Err(WasmError::InvalidModule(format!(
                "{} bytes is shorter than the module header",
                bytes.len()
            )));
        }
        if bytes[..4] != WASM_MAGIC {
            return Err(WasmError::InvalidModule("bad magic number".to_string()));
        }
        Ok(bytes)
    }
}
