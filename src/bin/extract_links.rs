use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use pdf_catalog::parser::LinkExtractor;
use pdf_catalog::utils::logger;

/// 提取PDF中的超链接，输出 [{page, uri}] JSON
#[derive(Parser)]
#[command(name = "extract-links")]
#[command(about = "Extract hyperlinks from a PDF", long_about = None)]
struct Cli {
    /// PDF 路径
    pdf: PathBuf,

    /// 写入文件而不是打印
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // JSON goes to stdout when no --out is given; log to stderr then.
    if cli.out.is_some() {
        logger::init_logger();
    } else {
        logger::init_stderr_logger("warn");
    }

    let links = LinkExtractor::new()
        .extract_links(&cli.pdf)
        .with_context(|| format!("无法读取PDF: {}", cli.pdf.display()))?;
    let json = serde_json::to_string_pretty(&links)?;

    match cli.out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json).with_context(|| format!("写入失败: {}", path.display()))?;
            info!("已写入 {} ({} 个链接)", path.display(), links.len());
        }
        None => println!("{}", json),
    }

    Ok(())
}
