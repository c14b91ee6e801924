//! Idempotent descriptor writes
//!
//! IDEs and file watchers reload a project whenever its descriptor is touched,
//! so a file is only rewritten when its bytes actually differ.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::error::{GenResult, IoContext};

const COMPARE_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Content differed (or the file was new) and was written
    Written,
    /// Existing content already matched, the file was not touched
    Unchanged,
}

/// Writes files only when their content changes.
///
/// Holds the chunk buffer used for comparisons so repeated writes in one pass
/// do not reallocate it.
#[derive(Debug)]
pub struct FileWriter {
    buffer: Vec<u8>,
}

impl Default for FileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileWriter {
    pub fn new() -> Self {
        Self {
            buffer: vec![0; COMPARE_CHUNK_SIZE],
        }
    }

    /// Write `content` to `path` unless the file already holds exactly these bytes
    pub fn write_if_changed(&mut self, path: &Path, content: &[u8]) -> GenResult<WriteOutcome> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .with_io_context("Failed to open file for writing", path)?;

        let length = file
            .metadata()
            .with_io_context("Failed to get file metadata", path)?
            .len();

        if length == content.len() as u64 {
            let same = self
                .matches(&mut file, content)
                .with_io_context("Failed to read existing file", path)?;
            if same {
                return Ok(WriteOutcome::Unchanged);
            }
        }

        rewrite(&mut file, content).with_io_context("Failed to write file", path)?;
        Ok(WriteOutcome::Written)
    }

    fn matches(&mut self, file: &mut File, content: &[u8]) -> io::Result<bool> {
        let mut offset = 0;
        while offset < content.len() {
            let read = file.read(&mut self.buffer)?;
            if read == 0 || read > content.len() - offset {
                return Ok(false);
            }
            if self.buffer[..read] != content[offset..offset + read] {
                return Ok(false);
            }
            offset += read;
        }
        Ok(true)
    }
}

fn rewrite(file: &mut File, content: &[u8]) -> io::Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.set_len(0)?;
    file.write_all(content)?;
    file.flush()
}
