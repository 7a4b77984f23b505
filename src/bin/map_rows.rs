use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pdf_catalog::utils::logger;
use pdf_catalog::{AppConfig, CatalogPipeline, ColumnAliases};

/// 将表格行映射为项目记录，追加到目录
#[derive(Parser)]
#[command(name = "map-rows")]
#[command(about = "Map extracted table rows into the project catalog", long_about = None)]
struct Cli {
    /// pdf-to-json 输出的 JSON
    input: PathBuf,

    /// 目录文件
    #[arg(long)]
    out: Option<PathBuf>,

    /// 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 列名别名文件，默认 config/aliases.toml
    #[arg(long)]
    aliases: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init_logger();
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("加载配置失败")?;
    let aliases = match cli.aliases {
        Some(path) => ColumnAliases::load_from(&path),
        None => ColumnAliases::load(),
    }
    .context("加载列名别名失败")?;
    let out = cli.out.unwrap_or_else(|| PathBuf::from(&config.paths.catalog));

    let pipeline = CatalogPipeline::new(&config.heuristics, aliases);
    let catalog = pipeline
        .map_rows(&cli.input, &out)
        .with_context(|| format!("生成目录失败: {}", out.display()))?;

    info!("✅ 完成: {} 条记录 (新增 {})", catalog.len(), catalog.added_len());
    Ok(())
}
