use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek},
    path::Path,
};

use anyhow::Context as _;
use zip::{ZipArchive, result::ZipError};

use crate::foundation::error::{PoseDistError, PoseDistResult};

/// Read-only view over one capture archive.
pub struct PoseArchive<R: Read + Seek> {
    zip: ZipArchive<R>,
}

impl PoseArchive<BufReader<File>> {
    /// Open an archive on disk.
    pub fn open(path: &Path) -> PoseDistResult<Self> {
        let file =
            File::open(path).with_context(|| format!("open archive '{}'", path.display()))?;
        Self::new(BufReader::new(file))
            .map_err(|e| PoseDistError::Other(anyhow::anyhow!("{e} ('{}')", path.display())))
    }
}

impl PoseArchive<Cursor<Vec<u8>>> {
    /// Wrap archive bytes already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> PoseDistResult<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> PoseArchive<R> {
    /// Wrap any seekable reader holding a zip container.
    pub fn new(reader: R) -> PoseDistResult<Self> {
        let zip = ZipArchive::new(reader).context("invalid zip archive")?;
        Ok(Self { zip })
    }

    /// Member names in archive order.
    pub fn names(&self) -> Vec<String> {
        self.zip.file_names().map(str::to_owned).collect()
    }

    /// `true` if a member with exactly this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.zip.index_for_name(name).is_some()
    }

    /// Read one member in full. `Ok(None)` when it is absent.
    pub fn read_bytes(&mut self, name: &str) -> PoseDistResult<Option<Vec<u8>>> {
        let mut member = match self.zip.by_name(name) {
            Ok(member) => member,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(anyhow::Error::new(e)
                    .context(format!("open archive member '{name}'"))
                    .into());
            }
        };
        let mut buf = Vec::with_capacity(usize::try_from(member.size()).unwrap_or(0));
        member
            .read_to_end(&mut buf)
            .with_context(|| format!("read archive member '{name}'"))?;
        Ok(Some(buf))
    }

    /// Read one member as UTF-8 text. `Ok(None)` when it is absent.
    pub fn read_string(&mut self, name: &str) -> PoseDistResult<Option<String>> {
        let Some(bytes) = self.read_bytes(name)? else {
            return Ok(None);
        };
        let text = String::from_utf8(bytes)
            .map_err(|e| PoseDistError::malformed(format!("'{name}' is not UTF-8: {e}")))?;
        Ok(Some(text))
    }

    /// Read the first present member of `candidates`, returning its name and bytes.
    pub fn read_first(&mut self, candidates: &[String]) -> PoseDistResult<Option<(String, Vec<u8>)>> {
        for name in candidates {
            if let Some(bytes) = self.read_bytes(name)? {
                return Ok(Some((name.clone(), bytes)));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/archive.rs"]
mod tests;
