#![allow(dead_code)]

use rureport::aggregator::{Browser, TestResult};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable in-memory sink for stdout and log capture
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Subscriber writing plain-text logs into `buffer`
pub fn log_subscriber(buffer: SharedBuffer) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_writer(move || buffer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish()
}

pub fn chrome() -> Browser {
    Browser::new("chrome-1", "Chrome 120.0 (Linux x86_64)")
}

pub fn firefox() -> Browser {
    Browser::new("firefox-1", "Firefox 121.0 (Linux x86_64)")
}

/// Results spread over both support categories
pub fn sample_results() -> Vec<(Browser, TestResult)> {
    vec![
        (
            chrome(),
            TestResult::new("renders rows", true, 1)
                .with_suite(["basic support", "rendering"])
                .with_log(["rendered 10 rows\nin 3ms"]),
        ),
        (
            chrome(),
            TestResult::new("virtual scroll", false, 3)
                .with_suite(["advanced support", "scrolling"])
                .with_log(["Expected 100 to be 200", "at scroll.spec.js:12"]),
        ),
        (
            firefox(),
            TestResult::new("renders rows", true, 1).with_suite(["basic support", "rendering"]),
        ),
    ]
}
