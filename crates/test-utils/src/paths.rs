//! Scratch directory helpers for tests that touch the filesystem.

use tempfile::TempDir;

/// Creates a fresh scratch directory, removed when the guard is dropped.
///
/// Honours `TEST_SCRATCH_DIR` when set, so failing runs can be inspected
/// from a known location.
pub fn scratch_dir() -> TempDir {
    match std::env::var("TEST_SCRATCH_DIR") {
        Ok(base) => {
            std::fs::create_dir_all(&base).expect("Failed to create TEST_SCRATCH_DIR");
            tempfile::Builder::new()
                .prefix("heightmap-")
                .tempdir_in(base)
                .expect("Failed to create scratch dir")
        }
        Err(_) => tempfile::Builder::new()
            .prefix("heightmap-")
            .tempdir()
            .expect("Failed to create scratch dir"),
    }
}
