//! Log bridge for the specimen binary.
//!
//! Routes every `log::info!()` etc. from all crates to stderr as
//! `[timestamp] [LEVEL] [target] message` lines, keeping stdout free for
//! query results.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the
//! `log_level` setting, then off.

use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use specimen_config::LogLevel;

/// Writes formatted records to a shared sink.
struct LogBridge {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        let mut sink = self.sink.lock();
        let _ = sink.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", timestamp, level, target, msg)
}

/// Pick the effective level from the CLI flag, `RUST_LOG` and settings.
pub fn effective_level(
    cli: Option<LogLevel>,
    rust_log: Option<&str>,
    configured: LogLevel,
) -> LogLevel {
    cli.or_else(|| rust_log.and_then(LogLevel::parse))
        .unwrap_or(configured)
}

/// Install the bridge as the global logger. Later calls only adjust the level.
pub fn init_log_bridge(level: LogLevel) {
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        sink: Mutex::new(Box::new(std::io::stderr())),
    });
    // Fails only if a logger is already installed, which is fine.
    let _ = log::set_logger(bridge);
    log::set_max_level(level.to_level_filter());
}
