//! Archive packaging for migration runs.
//!
//! The export working directory holds exactly one artifact, the embedded
//! store file, so the archive format is that file gzip-compressed. `unpack`
//! restores the store file into a destination directory before the import
//! read phase.

use crate::error::{Result, StoreError};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;

/// Compress the store file into a downloadable archive.
pub fn pack(store_file: &Path, archive_path: &Path) -> Result<()> {
    let mut input = BufReader::new(File::open(store_file)?);
    let output = File::create(archive_path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(output), Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder
        .finish()
        .map_err(|e| StoreError::Archive(format!("failed to finalize archive: {e}")))?;
    Ok(())
}

/// Decompress an uploaded archive back into a store file.
pub fn unpack(archive_path: &Path, store_file: &Path) -> Result<()> {
    let input = BufReader::new(File::open(archive_path)?);
    let mut decoder = GzDecoder::new(input);
    if let Some(parent) = store_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut output = BufWriter::new(File::create(store_file)?);
    io::copy(&mut decoder, &mut output)
        .map_err(|e| StoreError::Archive(format!("failed to unpack archive: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn pack_unpack_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("store.db");
        fs::write(&store, b"not really a database, but bytes are bytes").unwrap();

        let archive = dir.path().join("export.gz");
        pack(&store, &archive).unwrap();

        let restored = dir.path().join("restored/store.db");
        unpack(&archive, &restored).unwrap();

        assert_eq!(fs::read(&store).unwrap(), fs::read(&restored).unwrap());
    }

    #[test]
    fn unpack_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("bogus.gz");
        fs::write(&archive, b"this is not gzip").unwrap();

        let out = dir.path().join("out.db");
        assert!(unpack(&archive, &out).is_err());
    }

    #[test]
    fn unpack_missing_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.db");
        assert!(unpack(&dir.path().join("absent.gz"), &out).is_err());
    }
}
