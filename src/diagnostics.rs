use crate::error::Error;

/// Receives complaints about malformed description lines. Reporting never
/// stops processing.
pub trait Diagnostics {
    fn report(&mut self, error: Error);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn report(&mut self, error: Error) {
        log::warn!("{}", error);
    }
}

impl Diagnostics for Vec<Error> {
    fn report(&mut self, error: Error) {
        log::debug!("{}", error);
        self.push(error);
    }
}
