//! Logging capability injected into the client at construction.
//!
//! The client's debug flag gates every call before any formatting happens, so
//! a client with debug disabled does zero logging work. Sinks receive one
//! message per call, without a trailing newline, and append their own line
//! terminator.

/// Receives log lines from a client whose debug flag is enabled.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

/// Default sink: one line per message on stderr.
#[derive(Debug, Default)]
pub struct StderrLogger;

impl Logger for StderrLogger {
    fn log(&self, message: &str) {
        eprintln!("{message}");
    }
}
