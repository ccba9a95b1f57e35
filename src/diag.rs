//! Diagnostics log setup.
//!
//! Events come from `tracing` macros throughout the crate; this module builds
//! the subscriber that writes them as JSON lines with a local timestamp.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::MakeWriter;

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogSink {
    #[default]
    Off,
    Stderr,
    /// Append to a file, creating it if needed.
    File(PathBuf),
}

/// JSON-lines subscriber writing through `make_writer`.
///
/// Each line carries `timestamp`, `level`, `target` and `message`.
pub fn subscriber<W>(make_writer: W, level: LevelFilter) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_timer(ChronoLocal::rfc_3339())
        .with_max_level(level)
        .with_writer(make_writer)
        .finish()
}

/// Install the global subscriber for `sink`. `Off` installs nothing.
pub fn init(sink: &LogSink, level: LevelFilter) -> Result<()> {
    match sink {
        LogSink::Off => return Ok(()),
        LogSink::Stderr => {
            tracing::subscriber::set_global_default(subscriber(io::stderr, level))
                .context("install log subscriber")?;
        }
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing::subscriber::set_global_default(subscriber(Mutex::new(file), level))
                .context("install log subscriber")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lines_are_json_with_level_and_target() {
        let buf = Shared::default();
        let out = buf.clone();
        let subscriber = subscriber(move || out.clone(), LevelFilter::INFO);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "app", "started");
            tracing::debug!(target: "app", "filtered out");
            tracing::warn!(target: "audio", "device {}", "gone");
        });

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "INFO");
        assert_eq!(lines[0]["target"], "app");
        assert_eq!(lines[1]["message"], "device gone");
        assert!(lines[1]["timestamp"].as_str().is_some_and(|ts| ts.contains('T')));
    }

    #[test]
    fn off_sink_installs_nothing() {
        init(&LogSink::Off, LevelFilter::INFO).unwrap();
        assert!(!tracing::dispatcher::has_been_set());
    }
}
