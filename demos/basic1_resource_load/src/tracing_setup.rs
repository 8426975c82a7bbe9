use tracing::Level;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Installs a compact subscriber; `verbose` also shows the loader's debug events.
pub fn tracing_init(verbose: bool) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_max_level(level)
        .with_timer(SinceStart::default())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Wall-clock time plus milliseconds since the demo started.
#[derive(Debug, Clone, Copy)]
pub struct SinceStart {
    started: chrono::DateTime<chrono::Local>,
}

impl Default for SinceStart {
    fn default() -> Self {
        SinceStart {
            started: chrono::Local::now(),
        }
    }
}

impl FormatTime for SinceStart {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        let elapsed = (now - self.started).num_milliseconds();
        write!(w, "{} +{:>5}ms", now.format("%H:%M:%S"), elapsed)
    }
}
