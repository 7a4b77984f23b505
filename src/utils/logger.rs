use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const PDF_LIBS: &str = "lopdf=warn,pdf_extract=warn";

pub fn init_logger() {
    init_logger_at("info");
}

/// RUST_LOG 优先；否则使用给定级别，PDF 库只输出警告
pub fn init_logger_at(level: &str) {
    subscriber(default_filter(level), std::io::stdout).init();
}

/// 日志写到 stderr，stdout 留给 JSON 输出
pub fn init_stderr_logger(level: &str) {
    subscriber(default_filter(level), std::io::stderr).init();
}

fn default_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("{},{}", level, PDF_LIBS).into())
}

fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
}
