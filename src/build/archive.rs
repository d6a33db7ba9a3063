//! ZIP archive creation
//!
//! The archive is assembled in memory and only touches the disk in
//! [`ArchiveWriter::save`], so a failed add never leaves a partial zip behind.

use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::Path;

use anyhow::{Context, Result};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ForgeError;

/// In-memory zip builder
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    entries: usize,
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: 0,
        }
    }

    /// Number of files added so far
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Add a payload under `dest`
    #[cfg(test)]
    pub fn add_bytes(&mut self, dest: &str, data: &[u8]) -> Result<()> {
        self.add_bytes_with(dest, data, self.options)
    }

    fn add_bytes_with(&mut self, dest: &str, data: &[u8], options: SimpleFileOptions) -> Result<()> {
        let archive_err = |message: String| ForgeError::Archive {
            path: dest.into(),
            message,
        };

        self.zip
            .start_file(dest, options)
            .map_err(|e| archive_err(e.to_string()))?;
        self.zip
            .write_all(data)
            .map_err(|e| archive_err(e.to_string()))?;
        self.entries += 1;
        Ok(())
    }

    /// Add a single file from disk under `dest`
    pub fn add_file(&mut self, source: &Path, dest: &str) -> Result<()> {
        if !source.is_file() {
            return Err(ForgeError::Archive {
                path: source.to_path_buf(),
                message: "could not find file to archive".to_string(),
            }
            .into());
        }

        let data = fs::read(source).map_err(|e| ForgeError::filesystem("read", source, e))?;
        let options = self.options_for(source)?;
        tracing::debug!("archiving {} as {}", source.display(), dest);
        self.add_bytes_with(dest, &data, options)
    }

    /// Add a file, or every file below a directory as `dest/<relative path>`
    pub fn add_path(&mut self, source: &Path, dest: &str) -> Result<()> {
        if !source.is_dir() {
            return self.add_file(source, dest);
        }

        let dest = dest.trim_end_matches('/');
        for entry in WalkDir::new(source).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source)
                .context("Failed to get relative path")?
                .to_string_lossy()
                .replace('\\', "/");
            self.add_file(entry.path(), &format!("{}/{}", dest, relative))?;
        }
        Ok(())
    }

    #[cfg(unix)]
    fn options_for(&self, source: &Path) -> Result<SimpleFileOptions> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(source).map_err(|e| ForgeError::filesystem("read", source, e))?;
        Ok(self.options.unix_permissions(metadata.permissions().mode()))
    }

    #[cfg(not(unix))]
    fn options_for(&self, _source: &Path) -> Result<SimpleFileOptions> {
        Ok(self.options)
    }

    /// Finish the archive and write it to `path`
    pub fn save(self, path: &Path) -> Result<()> {
        let cursor = self.zip.finish().map_err(|e| ForgeError::Archive {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut file = File::create(path).map_err(|e| ForgeError::filesystem("create", path, e))?;
        file.write_all(&cursor.into_inner())
            .map_err(|e| ForgeError::filesystem("write", path, e))?;
        Ok(())
    }
}

/// Names and uncompressed sizes of the members of a zip on disk
pub fn list_entries(archive_path: &Path) -> Result<Vec<(String, u64)>> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path.display()))?;
    let mut zip = ZipArchive::new(file)
        .with_context(|| format!("Failed to read ZIP archive: {}", archive_path.display()))?;

    let mut entries = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let member = zip.by_index(i)?;
        entries.push((member.name().to_string(), member.size()));
    }
    Ok(entries)
}

/// Human-readable size
pub fn format_size(size: u64) -> String {
    if size >= 1024 * 1024 {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    } else if size >= 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{} B", size)
    }
}
