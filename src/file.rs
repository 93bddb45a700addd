use crate::sync_error::SyncResult;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes `data` to `dir/name`, creating `dir` when needed.
pub(crate) async fn write_file(dir: &Path, name: &str, data: &[u8]) -> SyncResult<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = dir.join(name);
    fs::write(&path, data).await?;
    Ok(path)
}

pub(crate) async fn read_file(path: &Path) -> SyncResult<Bytes> {
    Ok(Bytes::from(fs::read(path).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");

        let path = write_file(&target, "9.jpg", b"jpeg").await.unwrap();

        assert_eq!(path, target.join("9.jpg"));
        assert_eq!(read_file(&path).await.unwrap(), Bytes::from_static(b"jpeg"));
    }
}
