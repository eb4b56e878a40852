//! Console Logging
//!
//! `tracing-subscriber` fmt output routed to the browser console.

use std::io;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Buffers one formatted event and logs it on drop
#[derive(Default)]
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&line.trim_end().into());
    }
}

pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::default()
    }
}

/// Install the global subscriber. `filter` uses `EnvFilter` directive syntax.
pub fn init(filter: &str) {
    // wasm32 has no clock for the default timer.
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(MakeConsoleWriter)
        .without_time()
        .with_target(false)
        .try_init();

    if result.is_err() {
        web_sys::console::warn_1(&"tracing subscriber already installed".into());
    }
}
