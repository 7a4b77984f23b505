pub mod logger;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("配置错误: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("别名配置错误: {0}")]
    Aliases(#[from] toml::de::Error),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF处理错误: {0}")]
    Pdf(String),

    #[error("解码错误: {0}")]
    Decode(String),

    #[error("目录文件错误: {0}")]
    Catalog(String),
}

impl From<lopdf::Error> for CatalogError {
    fn from(e: lopdf::Error) -> Self {
        CatalogError::Pdf(e.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
