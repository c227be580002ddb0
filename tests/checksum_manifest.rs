use release_bundler::{
    bundler::{ArtifactHasher, ChecksumManifest, Error, Result, Sha256Hasher},
    version::Version,
};
use std::path::Path;

/// Digest is the file length; keeps expectations readable.
struct LengthHasher;

impl ArtifactHasher for LengthHasher {
    fn algorithm(&self) -> &'static str {
        "LEN"
    }

    async fn digest(&self, path: &Path) -> Result<String> {
        Ok(std::fs::metadata(path)?.len().to_string())
    }
}

#[tokio::test]
async fn manifest_layout() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("b-Linux-x64.tar.gz"), "12345").expect("write");
    std::fs::write(dir.path().join("a-Windows-x64.zip"), "123").expect("write");
    std::fs::write(dir.path().join(".c.tar.gz.1234.partial"), "x").expect("write");
    std::fs::write(dir.path().join(".hidden.zip"), "x").expect("write");
    std::fs::create_dir(dir.path().join("dir.zip")).expect("mkdir");

    let manifest = ChecksumManifest::generate(dir.path(), "RFTX TUNING", &Version::new(2, 1, 0), &LengthHasher)
        .await
        .expect("manifest");

    assert_eq!(
        manifest.render(),
        format!(
            "RFTX TUNING v2.1.0 - LEN Checksums\n{}\n\n3  a-Windows-x64.zip\n5  b-Linux-x64.tar.gz\n",
            "=".repeat(60)
        )
    );
}

#[tokio::test]
async fn sha256_digest_of_known_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("app.zip"), "abc").expect("write");

    let manifest = ChecksumManifest::generate(dir.path(), "App", &Version::new(1, 0, 0), &Sha256Hasher)
        .await
        .expect("manifest");

    assert_eq!(manifest.entries.len(), 1);
    assert_eq!(
        manifest.entries[0].digest,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[tokio::test]
async fn empty_release_dir_gives_header_only() {
    let dir = tempfile::tempdir().expect("tempdir");

    let manifest = ChecksumManifest::generate(dir.path(), "App", &Version::new(1, 0, 0), &Sha256Hasher)
        .await
        .expect("manifest");
    let path = manifest.write(dir.path()).await.expect("write");

    let text = std::fs::read_to_string(path).expect("read");
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("App v1.0.0 - SHA256 Checksums\n"));
}

#[tokio::test]
async fn missing_release_dir_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    let err = ChecksumManifest::generate(
        &dir.path().join("releases"),
        "App",
        &Version::new(1, 0, 0),
        &Sha256Hasher,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Checksum { .. }));
}
