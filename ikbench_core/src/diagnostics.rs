//! Leveled diagnostics sink injected into the harness.
//!
//! Production code logs through `tracing`; tests swap in a silent or
//! recording sink so runs stay deterministic and quiet.

pub trait Diagnostics {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to `tracing` under the `ikbench` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "ikbench", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "ikbench", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "ikbench", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ikbench", "{}", message);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn debug(&self, message: &str) {
        (**self).debug(message)
    }

    fn info(&self, message: &str) {
        (**self).info(message)
    }

    fn warn(&self, message: &str) {
        (**self).warn(message)
    }

    fn error(&self, message: &str) {
        (**self).error(message)
    }
}
