use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::LineStatus;

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub output_dir: PathBuf,
    /// 倍数表路径，每次请求重新读取
    pub multiples_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("outputs"),
            multiples_path: PathBuf::from("multiplos.csv"),
        }
    }
}

/// 列重命名规则
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// 各状态在输出表中的文字
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusLabels {
    pub ok: String,
    pub adjusted: String,
    pub below_minimum: String,
    pub missing_multiple: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self {
            ok: "ok".to_string(),
            adjusted: "ajustado".to_string(),
            below_minimum: "abaixo_do_mínimo".to_string(),
            missing_multiple: "Este_item_não_existe_na_planilha_de_múltiplo_atualize".to_string(),
        }
    }
}

impl StatusLabels {
    pub fn label(&self, status: LineStatus) -> &str {
        match status {
            LineStatus::Ok => &self.ok,
            LineStatus::Adjusted => &self.adjusted,
            LineStatus::BelowMinimum => &self.below_minimum,
            LineStatus::MissingMultiple => &self.missing_multiple,
        }
    }
}

/// 输出工作簿配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub accepted_sheet: String,
    pub review_sheet: String,
    pub status_column: String,
    /// 输出文件名后缀（含扩展名）
    pub file_suffix: String,
    /// 输出时删除的列
    pub dropped_columns: Vec<String>,
    pub renamed_columns: Vec<ColumnRename>,
    pub status_labels: StatusLabels,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let dropped = [
            "Custo total",
            "Unnamed: 15",
            "Quantidade aceita",
            "Quantidade de ASN",
            "Quantidade recebida",
            "Quantidade pendente",
            "SKU",
        ];
        let renamed = [
            ("QTY", "Quantidade solicitada pela Amazon"),
            ("Quantidade solicitada", "Quantidade Ajustada"),
        ];

        Self {
            accepted_sheet: "Pedido".to_string(),
            review_sheet: "Removidos".to_string(),
            status_column: "Status".to_string(),
            file_suffix: "_processado.xlsx".to_string(),
            dropped_columns: dropped.iter().map(|s| s.to_string()).collect(),
            renamed_columns: renamed
                .iter()
                .map(|(from, to)| ColumnRename {
                    from: from.to_string(),
                    to: to.to_string(),
                })
                .collect(),
            status_labels: StatusLabels::default(),
        }
    }
}

impl AppConfig {
    /// 加载配置：默认值 -> config/default.toml -> $ORDER_MULTIPLES_CONFIG -> 环境变量
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false));

        if let Ok(path) = std::env::var("ORDER_MULTIPLES_CONFIG") {
            builder = builder.add_source(config::File::with_name(&path));
        }

        let settings = builder.add_source(env_source()).build()?;

        let mut cfg: AppConfig = settings.try_deserialize()?;
        cfg.apply_legacy_env();
        Ok(cfg)
    }

    /// 兼容旧的 SERVER_HOST / SERVER_PORT 环境变量
    fn apply_legacy_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}

/// ORDER_MULTIPLES_<SECTION>__<KEY>，例如 ORDER_MULTIPLES_SERVER__PORT=9000
fn env_source() -> config::Environment {
    config::Environment::with_prefix("ORDER_MULTIPLES")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
