use std::{
    fs,
    fs::OpenOptions,
    io::{self, IsTerminal},
    path::Path,
    str::FromStr,
};

use chrono::Local;
use eyre::WrapErr;
use tracing::{level_filters::LevelFilter, Subscriber};
use tracing_appender::non_blocking;
use tracing_subscriber::{
    fmt::{self, format::Writer, time::FormatTime, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Tracing guard를 보관하는 구조체
/// 이 구조체가 drop되기 전까지 파일 로깅이 계속 작동합니다
pub struct TracingGuards {
    _file: tracing_appender::non_blocking::WorkerGuard,
}

/// 로그 타임스탬프: 2025-11-29 13:05:42.117 (로컬 시간)
pub struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// 파일과 stdout이 같이 쓰는 한 줄 포맷: `<timestamp> <LEVEL> <target>: <message>`
pub fn log_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_timer(LocalTimestamp)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer)
}

/// Tracing 초기화
/// 같은 포맷으로 파일과 stdout 양쪽에 기록합니다. RUST_LOG가 있으면 그 위에 덧붙입니다
pub fn init_tracing(log_file: &Path, log_level: &str) -> eyre::Result<TracingGuards> {
    // 1) 파일 appender
    let (file_writer, file_guard) = file_appender(log_file)?;

    // 2) EnvFilter
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_level(log_level).into())
        .from_env_lossy();

    // 3) 레이어 조립
    // stdout은 요약 출력(println)과 순서가 섞이지 않도록 동기식으로 쓴다
    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_layer(file_writer, false))
        .with(log_layer(io::stdout, io::stdout().is_terminal()))
        .try_init()
        .wrap_err("failed to install tracing subscriber")?;

    Ok(TracingGuards { _file: file_guard })
}

/// 로그 레벨 문자열 해석. 대소문자 무시, 모르는 값은 INFO
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_uppercase().as_str() {
        "WARNING" => LevelFilter::WARN,
        "CRITICAL" | "FATAL" => LevelFilter::ERROR,
        other => LevelFilter::from_str(other).unwrap_or(LevelFilter::INFO),
    }
}

/// 지정된 경로에 이어쓰기로 로그 파일을 연다. 상위 디렉터리가 없으면 만든다
fn file_appender(
    path: &Path,
) -> eyre::Result<(
    non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create log directory {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    Ok(non_blocking(file))
}
