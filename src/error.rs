use thiserror::Error;

/// 对账流程错误
///
/// 行级问题（倍数表中无法解析的行、订单中无法解析的数量）不会出现在这里，
/// 它们在各自模块内被跳过或置零。
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// 倍数表缺少必需列
    #[error("multiple table is missing required columns: {0}")]
    Configuration(String),

    /// 订单表中无法识别商品编码列或数量列
    #[error("could not detect item identifier / quantity columns automatically, check the file")]
    Detection,

    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("failed to read order file: {0}")]
    OrderRead(String),

    /// 上传请求不完整（缺少文件、文件名为空等）
    #[error("{0}")]
    Upload(String),

    #[error("invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("failed to write workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
