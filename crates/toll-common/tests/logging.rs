//! Global subscriber installation.
//!
//! Kept in its own test binary because the subscriber is process-wide.

use std::io;
use std::sync::{Arc, Mutex};

use toll_common::logging::{LogConfig, LogFormat, init_logging_with_writer};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

struct CaptureGuard(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = CaptureGuard;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureGuard(Arc::clone(&self.0))
    }
}

#[test]
fn json_logging_captures_workspace_events_once() {
    let capture = Capture::default();
    let config = LogConfig::default().with_format(LogFormat::Json);
    init_logging_with_writer(&config, capture.clone()).unwrap();

    tracing::info!(target: "toll_transform", rows = 3, "computed toll rates");

    let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("computed toll rates"));
    assert!(output.contains("\"rows\":3"));

    assert!(init_logging_with_writer(&config, capture).is_err());
}
