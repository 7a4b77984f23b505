use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pdf_catalog::parser::ExtractionPipeline;
use pdf_catalog::utils::logger;
use pdf_catalog::AppConfig;

/// 将PDF中的表格（或全文）转换为 JSON
#[derive(Parser)]
#[command(name = "pdf-to-json")]
#[command(about = "Convert PDF tables or text to JSON rows", long_about = None)]
struct Cli {
    /// PDF 路径
    pdf: PathBuf,

    /// 输出路径，默认取配置 paths.extracted
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// 配置文件
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    logger::init_logger();
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref()).context("加载配置失败")?;
    let out = cli.out.unwrap_or_else(|| PathBuf::from(&config.paths.extracted));

    let pipeline = ExtractionPipeline::new(config.heuristics.raw_text_chars);
    let extraction = pipeline
        .process(&cli.pdf)
        .with_context(|| format!("无法读取PDF: {}", cli.pdf.display()))?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&extraction.to_json()?)?;
    std::fs::write(&out, json).with_context(|| format!("写入失败: {}", out.display()))?;

    info!("已写入 {} ({} 条)", out.display(), extraction.len());
    Ok(())
}
