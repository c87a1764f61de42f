//! Session logging.
//!
//! A drawing session owns stdout, so log records go to a file instead.
//! The filter is read from an environment variable in the usual
//! `env_logger` syntax (`TURTLE_LOG` for the bundled binary); the file is
//! appended to, so traces survive across sessions.

use std::env;
use std::ffi::OsStr;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use env_logger::filter::{Builder, Filter};
use log::{Log, Metadata, Record};

pub struct Logger {
    sink: Mutex<File>,
    filter: Filter,
}

impl Logger {
    /// Installs the logger as the global `log` backend.
    ///
    /// # Panics
    ///
    /// Panics if the log file cannot be opened or another logger is
    /// already installed.
    pub fn init(env_var: impl AsRef<OsStr>, path: impl AsRef<Path>) {
        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("could not open log file");

        let logger = Logger {
            sink: Mutex::new(sink),
            filter: filter_from_env(env_var),
        };

        log::set_max_level(logger.filter.filter());
        log::set_boxed_logger(Box::new(logger)).expect("could not install logger");
    }
}

fn filter_from_env(env_var: impl AsRef<OsStr>) -> Filter {
    let mut builder = Builder::new();

    if let Ok(spec) = env::var(env_var) {
        builder.parse(&spec);
    }

    builder.build()
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.filter.matches(record) {
            return;
        }

        if let Ok(mut sink) = self.sink.lock() {
            let _ = writeln!(
                sink,
                "[{:5}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Mutex;

    use env_logger::filter::Builder;
    use log::{Level, Log, Metadata, Record};
    use tempfile::NamedTempFile;

    use super::Logger;

    fn logger(spec: &str, sink: std::fs::File) -> Logger {
        let mut builder = Builder::new();
        builder.parse(spec);

        Logger {
            sink: Mutex::new(sink),
            filter: builder.build(),
        }
    }

    #[test]
    fn respects_the_filter() {
        let (file, path) = NamedTempFile::new().unwrap().into_parts();
        let logger = logger("warn", file);

        logger.log(
            &Record::builder()
                .args(format_args!("quiet"))
                .level(Level::Debug)
                .target("turtle::session")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("loud"))
                .level(Level::Error)
                .target("turtle::session")
                .build(),
        );
        logger.flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("quiet"));
        assert!(written.contains("[ERROR] turtle::session: loud"));
    }

    #[test]
    fn enabled_follows_the_spec_per_module() {
        let (file, _path) = NamedTempFile::new().unwrap().into_parts();
        let logger = logger("turtle::turtle=debug,warn", file);

        let metadata = |level, target| Metadata::builder().level(level).target(target).build();

        assert!(logger.enabled(&metadata(Level::Debug, "turtle::turtle")));
        assert!(!logger.enabled(&metadata(Level::Debug, "turtle::config")));
        assert!(logger.enabled(&metadata(Level::Warn, "turtle::config")));
    }
}
