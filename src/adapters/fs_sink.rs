//! Filesystem JSON sink adapter.
//!
//! Implements [`JsonSink`] by overwriting `<base_dir>/<name>.json`. The
//! base directory is created on first use so a fresh deployment works
//! without manual setup. The dispatcher is the only writer of these files,
//! so plain overwrites are race-free by construction.

use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, info};

use crate::app::ports::JsonSink;

/// Sink that persists payloads as JSON files under one directory.
pub struct FsJsonSink {
    base_dir: PathBuf,
}

impl FsJsonSink {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

impl JsonSink for FsJsonSink {
    fn write_named(&mut self, name: &str, content: &str) -> Result<(), io::Error> {
        if !self.base_dir.exists() {
            info!("creating output directory {}", self.base_dir.display());
            fs::create_dir_all(&self.base_dir)?;
        }

        let path = self.base_dir.join(format!("{name}.json"));
        fs::write(&path, content)?;
        debug!("wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}
