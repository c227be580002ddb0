//! Release archive creation (`.zip` and `.tar.gz`).
//!
//! Archives contain a single top-level directory named after the archive, so
//! unpacking never scatters files into the current directory. The archive is
//! written under a temporary name in the destination directory and renamed
//! into place once complete.

use crate::{
    bail,
    bundler::{
        error::{Error, ErrorExt, Result},
        platform::ArchiveFormat,
    },
};
use flate2::{Compression, write::GzEncoder};
use std::{
    fs::File,
    io,
    path::{Component, Path, PathBuf},
};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Compresses `source_dir` into `dest`, rooted at `root_name/`.
///
/// An existing file at `dest` is replaced only after the new archive has been
/// fully written.
pub async fn create_archive(
    format: ArchiveFormat,
    source_dir: &Path,
    root_name: &str,
    dest: &Path,
) -> Result<()> {
    if root_name.is_empty() || root_name.contains(['/', '\\']) {
        bail!("invalid archive root `{root_name}`");
    }

    let source_dir = source_dir.to_path_buf();
    let root_name = root_name.to_string();
    let dest = dest.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let temp = temp_path(&dest);
        let written = File::create(&temp)
            .fs_context("creating archive", &temp)
            .and_then(|file| match format {
                ArchiveFormat::TarGz => write_tar_gz(file, &source_dir, &root_name),
                ArchiveFormat::Zip => write_zip(file, &source_dir, &root_name),
            });

        if let Err(e) = written {
            let _ = std::fs::remove_file(&temp);
            return Err(e);
        }

        std::fs::rename(&temp, &dest).fs_context("moving archive into place", &dest)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Archive task panicked: {e}")))?
}

/// Hidden sibling of `dest` that archive discovery will not pick up.
fn temp_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!(".{name}.{}.partial", uuid::Uuid::new_v4()))
}

fn write_tar_gz(file: File, source_dir: &Path, root_name: &str) -> Result<()> {
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);
    builder
        .append_dir_all(root_name, source_dir)
        .fs_context("adding to tar archive", source_dir)?;

    let encoder = builder
        .into_inner()
        .fs_context("finishing tar archive", source_dir)?;
    encoder
        .finish()
        .fs_context("finishing gzip stream", source_dir)?;
    Ok(())
}

fn write_zip(file: File, source_dir: &Path, root_name: &str) -> Result<()> {
    let mut zip = ZipWriter::new(file);

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(source_dir)?;
        let name = zip_entry_name(root_name, rel_path);
        let options = file_options(&entry)?;

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
        } else if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
            zip.add_symlink(name, target.to_string_lossy().into_owned(), options)?;
        } else {
            zip.start_file(name, options)?;
            let mut source = File::open(entry.path()).fs_context("opening file", entry.path())?;
            io::copy(&mut source, &mut zip).fs_context("compressing file", entry.path())?;
        }
    }

    zip.finish()?;
    Ok(())
}

/// Forward-slash entry name, independent of the host separator.
fn zip_entry_name(root_name: &str, rel_path: &Path) -> String {
    let mut name = root_name.to_string();
    for component in rel_path.components() {
        if let Component::Normal(part) = component {
            name.push('/');
            name.push_str(&part.to_string_lossy());
        }
    }
    name
}

#[cfg(unix)]
fn file_options(entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = entry
        .path()
        .symlink_metadata()
        .fs_context("reading metadata", entry.path())?;
    Ok(SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(metadata.permissions().mode() & 0o7777))
}

#[cfg(not(unix))]
fn file_options(_entry: &walkdir::DirEntry) -> Result<SimpleFileOptions> {
    Ok(SimpleFileOptions::default().compression_method(CompressionMethod::Deflated))
}
