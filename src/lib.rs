pub mod bitstreams;
pub mod huffman;
pub mod processor;

/// Sink for user-facing status and error messages produced while compressing
/// or decompressing. Recoverable data-format failures are reported here in
/// addition to being returned as errors; the core never prints on its own.
pub trait StatusSink {
    fn show_error(&mut self, msg: &str);
    fn show_status(&mut self, msg: &str);
}

/// A sink that swallows every message.
#[derive(Clone, Copy, Default, Debug)]
pub struct NoopSink;

impl StatusSink for NoopSink {
    fn show_error(&mut self, _msg: &str) {}
    fn show_status(&mut self, _msg: &str) {}
}

/// A sink that forwards messages to the `log` facade.
#[derive(Clone, Copy, Default, Debug)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn show_error(&mut self, msg: &str) {
        log::error!("{}", msg);
    }

    fn show_status(&mut self, msg: &str) {
        log::info!("{}", msg);
    }
}
