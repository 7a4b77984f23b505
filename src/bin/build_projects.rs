use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pdf_catalog::utils::logger;
use pdf_catalog::{AppConfig, CatalogPipeline, ColumnAliases};

/// 将链接与PDF文本配对，生成 data/projects.json
#[derive(Parser)]
#[command(name = "build-projects")]
#[command(about = "Build project records from extracted links and PDF text", long_about = None)]
struct Cli {
    /// extract-links 的输出
    #[arg(long)]
    links: Option<PathBuf>,

    /// pdf-to-json 的输出
    #[arg(long)]
    text: Option<PathBuf>,

    /// 目录文件
    #[arg(long)]
    out: Option<PathBuf>,

    /// 配置文件
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init_logger();
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("加载配置失败")?;
    let links = cli.links.unwrap_or_else(|| PathBuf::from(&config.paths.links));
    let text = cli.text.unwrap_or_else(|| PathBuf::from(&config.paths.text));
    let out = cli.out.unwrap_or_else(|| PathBuf::from(&config.paths.catalog));

    let pipeline = CatalogPipeline::new(&config.heuristics, ColumnAliases::default());
    let catalog = pipeline
        .build_projects(&links, &text, &out)
        .with_context(|| format!("生成目录失败: {}", out.display()))?;

    info!("✅ 完成: {} 条记录 (新增 {})", catalog.len(), catalog.added_len());
    Ok(())
}
