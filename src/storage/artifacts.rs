use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::StorageConfig;
use crate::error::{ReconcileError, Result};

use super::filename::secure_filename;

/// 上传文件与输出文件的存放目录，按文件名存取，不加锁
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    upload_dir: PathBuf,
    output_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(cfg: &StorageConfig) -> Self {
        Self {
            upload_dir: cfg.upload_dir.clone(),
            output_dir: cfg.output_dir.clone(),
        }
    }

    /// 创建目录（启动时调用）
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 保存上传文件，返回保存后的安全文件名
    pub async fn save_upload(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let name = checked_name(filename)?;
        tokio::fs::write(self.upload_dir.join(&name), bytes).await?;
        debug!("Saved upload {} ({} bytes)", name, bytes.len());
        Ok(name)
    }

    /// 写入输出文件，同名文件直接覆盖
    pub async fn write_output(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = checked_name(filename)?;
        let path = self.output_dir.join(&name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// 读取输出文件；文件名不安全或文件不存在时返回 None
    pub async fn read_output(&self, filename: &str) -> Result<Option<Vec<u8>>> {
        if secure_filename(filename) != filename || filename.is_empty() {
            return Ok(None);
        }

        match tokio::fs::read(self.output_dir.join(filename)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// 输出文件名：安全化后的订单名 + 后缀
pub fn output_filename(order_name: &str, suffix: &str) -> Result<String> {
    let base = checked_name(order_name)?;
    Ok(format!("{}{}", base, suffix))
}

fn checked_name(filename: &str) -> Result<String> {
    let name = secure_filename(filename);
    if name.is_empty() {
        return Err(ReconcileError::InvalidFilename(filename.to_string()));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> ArtifactStore {
        let cfg = StorageConfig {
            upload_dir: dir.join("uploads"),
            output_dir: dir.join("outputs"),
            multiples_path: dir.join("multiplos.csv"),
        };
        let store = ArtifactStore::new(&cfg);
        store.ensure_dirs().unwrap();
        store
    }

    #[tokio::test]
    async fn output_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let name = output_filename("Pedido Março", "_processado.xlsx").unwrap();
        assert_eq!(name, "Pedido_Marco_processado.xlsx");

        store.write_output(&name, b"data").await.unwrap();
        assert_eq!(store.read_output(&name).await.unwrap(), Some(b"data".to_vec()));
        assert_eq!(store.read_output("missing.xlsx").await.unwrap(), None);
    }

    #[tokio::test]
    async fn traversal_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        std::fs::write(dir.path().join("secret.txt"), b"x").unwrap();

        assert_eq!(store.read_output("../secret.txt").await.unwrap(), None);
        assert_eq!(store.read_output("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn upload_name_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());

        let saved = store.save_upload("../pedido 1.csv", b"SKU,QTY\n").await.unwrap();
        assert_eq!(saved, "pedido_1.csv");
        assert!(store.upload_dir().join("pedido_1.csv").exists());
    }

    #[test]
    fn empty_order_name_is_invalid() {
        let err = output_filename("...", "_processado.xlsx").unwrap_err();
        assert!(matches!(err, ReconcileError::InvalidFilename(_)));
    }
}
