//! Error types for the DX11 lessons
//!
//! Every fallible operation (device creation, state-object compilation,
//! asset decoding) reports one of these. Capacity overruns are caller bugs
//! and panic instead.

use std::fmt;

/// Result type for DX11 lesson operations
pub type Result<T> = std::result::Result<T, Error>;

/// DX11 lesson errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Native API call failed (HRESULT text included)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (mesh, image, shader signature, etc.)
    InvalidResource(String),

    /// Initialization failed (device, swap chain, window handle)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Log an ERROR message and build an `Error::BackendError` carrying it
///
/// # Example
///
/// ```no_run
/// # use dx11_lessons::dx_err;
/// let err = dx_err!("dx11::MeshBuffer", "CreateBuffer failed: {}", "E_INVALIDARG");
/// ```
#[macro_export]
macro_rules! dx_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::dx11::Log::log_detailed(
            $crate::dx11::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::dx11::Error::BackendError(message)
    }};
}

/// Log an ERROR message and return `Err(Error::BackendError)` from the
/// enclosing function
#[macro_export]
macro_rules! dx_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::dx_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
