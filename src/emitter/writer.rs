use crate::Result;
use crate::aggregator::Report;
use crate::config::ReporterConfig;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;

const INDENT: &[u8] = b"    ";

/// Outcome of emitting one report
#[derive(Debug)]
pub enum Emission {
    /// Report file written before returning
    Written(PathBuf),
    /// Background write in flight; its result is only logged
    Pending(JoinHandle<()>),
    /// Write failed and was logged
    Failed(String),
    /// Compact report went to the stdout sink
    Stdout,
}

impl Emission {
    pub fn is_failed(&self) -> bool {
        matches!(self, Emission::Failed(_))
    }
}

/// Pretty JSON with a 4-space indent
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}

pub fn to_compact_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Writes finished reports to a file or to stdout
pub struct Emitter {
    config: ReporterConfig,
    stdout: Box<dyn Write + Send>,
}

impl Emitter {
    pub fn new(config: ReporterConfig) -> Self {
        Self::with_stdout(config, io::stdout())
    }

    /// Route the compact report to `sink` instead of process stdout
    pub fn with_stdout(config: ReporterConfig, sink: impl Write + Send + 'static) -> Self {
        Self {
            config,
            stdout: Box::new(sink),
        }
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Write `report`; file failures are logged, never returned
    pub fn emit(&mut self, report: &Report) -> Emission {
        match self.config.output_file.clone() {
            Some(path) => self.write_file(&path, report),
            None => self.write_stdout(report),
        }
    }

    fn write_file(&self, path: &Path, report: &Report) -> Emission {
        let bytes = match to_pretty_json(report) {
            Ok(bytes) => bytes,
            Err(e) => return write_failed(path, &e),
        };

        if let Err(e) = ensure_parent_dir(path) {
            return write_failed(path, &e);
        }

        if self.config.is_synchronous {
            return write_sync(path, &bytes);
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let path = path.to_path_buf();
                Emission::Pending(handle.spawn(async move {
                    match tokio::fs::write(&path, bytes).await {
                        Ok(()) => {
                            tracing::debug!("Test results were written to JSON file {}", path.display())
                        }
                        Err(e) => {
                            write_failed(&path, &e);
                        }
                    }
                }))
            }
            Err(_) => {
                tracing::debug!("No async runtime available, writing report synchronously");
                write_sync(path, &bytes)
            }
        }
    }

    fn write_stdout(&mut self, report: &Report) -> Emission {
        let written = to_compact_json(report).and_then(|bytes| {
            self.stdout.write_all(&bytes)?;
            self.stdout.flush()?;
            Ok(())
        });

        match written {
            Ok(()) => Emission::Stdout,
            Err(e) => {
                tracing::warn!("Cannot write test results to stdout: {}", e);
                Emission::Failed(e.to_string())
            }
        }
    }
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

fn write_sync(path: &Path, bytes: &[u8]) -> Emission {
    tracing::debug!("Writing test results to JSON file {}", path.display());
    match fs::write(path, bytes) {
        Ok(()) => Emission::Written(path.to_path_buf()),
        Err(e) => write_failed(path, &e),
    }
}

fn write_failed(path: &Path, err: &dyn std::fmt::Display) -> Emission {
    tracing::warn!(
        "Cannot write test results to JSON file {}: {}",
        path.display(),
        err
    );
    Emission::Failed(err.to_string())
}
