use thiserror::Error;

/// The OpenGL 1.x error taxonomy. Exactly one of these can be latched on a [`crate::Context`]
/// at a time; see [`crate::Context::get_error`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlError {
    #[error("invalid enum")]
    InvalidEnum,
    #[error("invalid value")]
    InvalidValue,
    #[error("invalid operation")]
    InvalidOperation,
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,
    #[error("out of memory")]
    OutOfMemory,
}

/// A single first-error-wins slot, read and cleared only by [`crate::Context::get_error`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorLatch(Option<GlError>);

impl ErrorLatch {
    pub const fn new() -> ErrorLatch {
        ErrorLatch(None)
    }

    /// Latches `err` only if nothing is currently latched.
    pub fn set(&mut self, err: GlError) {
        if self.0.is_none() {
            log::warn!("softgl: {err}");
            self.0 = Some(err);
        }
    }

    /// Reads and clears the latch, returning `None` if no error was pending.
    pub fn take(&mut self) -> Option<GlError> {
        self.0.take()
    }
}
