//! Response status observer.
//!
//! Sits on the response path of a single request. Every status write is
//! recorded and then forwarded unchanged; the observer never suppresses or
//! repeats a write. Until something is written the code stays at `0`.

/// Captured code before any status was written.
pub const UNSET_STATUS: u16 = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusObserver {
    code: u16,
}

impl StatusObserver {
    pub fn new() -> Self {
        Self { code: UNSET_STATUS }
    }

    /// Record the status carried by a value and pass the value through untouched.
    /// Last write wins.
    pub fn observe<T>(&mut self, value: T, status_of: impl FnOnce(&T) -> u16) -> T {
        self.code = status_of(&value);
        value
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Label value for the captured code; `"0"` when nothing was written.
    pub fn code_label(&self) -> String {
        self.code.to_string()
    }
}
