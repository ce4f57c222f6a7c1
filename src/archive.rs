use crate::error::{Error, Result};
use log::debug;
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};
use zip::ZipArchive;

/// Extracts every entry of the zip archive at `archive_path` into `dest_dir`,
/// replacing files that already exist there. Returns the extracted file paths.
pub fn unpack<P, Q>(archive_path: P, dest_dir: Q) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let archive_path = archive_path.as_ref();
    let dest_dir = dest_dir.as_ref();
    let to_archive_error = |source| Error::Archive {
        path: archive_path.to_owned(),
        source,
    };

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(to_archive_error)?;
    let mut extracted = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(to_archive_error)?;
        let relative = entry
            .enclosed_name()
            .map(|p| p.to_owned())
            .ok_or_else(|| Error::UnsafeArchiveEntry(entry.name().to_owned()))?;
        let out_path = dest_dir.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("extracting {} to {}", entry.name(), out_path.display());
        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
        extracted.push(out_path);
    }

    Ok(extracted)
}

#[cfg(test)]
pub(crate) mod tests {
    extern crate pretty_assertions;

    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};
    use zip::{write::FileOptions, ZipWriter};

    /// Builds an in-memory zip archive out of `(name, content)` pairs.
    pub(crate) fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn write_archive(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("comment.zip");
        fs::write(&path, zip_bytes(entries)).unwrap();
        path
    }

    #[test]
    fn unpacks_all_entries() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(
            dir.path(),
            &[("pr_number", b"42"), ("result", b"All tests passed.\n")],
        );

        let mut files = unpack(&archive, dir.path()).unwrap();
        files.sort();

        assert_eq!(files, vec![dir.path().join("pr_number"), dir.path().join("result")]);
        assert_eq!(fs::read_to_string(dir.path().join("pr_number")).unwrap(), "42");
        assert_eq!(
            fs::read_to_string(dir.path().join("result")).unwrap(),
            "All tests passed.\n"
        );
    }

    #[test]
    fn overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("result"), "stale result from a previous run").unwrap();
        let archive = write_archive(dir.path(), &[("result", b"fresh")]);

        unpack(&archive, dir.path()).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("result")).unwrap(), "fresh");
    }

    #[test]
    fn creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("reports/summary.md", b"# Summary")]);
        let out = dir.path().join("out");

        unpack(&archive, &out).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("reports/summary.md")).unwrap(),
            "# Summary"
        );
    }

    #[test]
    fn rejects_entries_escaping_the_destination() {
        let dir = tempfile::tempdir().unwrap();
        let archive = write_archive(dir.path(), &[("../evil", b"boom")]);
        let out = dir.path().join("out");

        let err = unpack(&archive, &out).unwrap_err();

        assert!(matches!(err, Error::UnsafeArchiveEntry(ref name) if name == "../evil"));
        assert!(!dir.path().join("evil").exists());
    }

    #[test]
    fn malformed_archive_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comment.zip");
        fs::write(&path, b"definitely not a zip file").unwrap();

        let err = unpack(&path, dir.path()).unwrap_err();

        assert!(matches!(err, Error::Archive { .. }));
    }

    #[test]
    fn missing_archive_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = unpack(dir.path().join("missing.zip"), dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
