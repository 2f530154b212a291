use thiserror::Error;

/// A single failed call into the native shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("HRESULT {code:#010X}{}", detail(.message))]
pub struct NativeError {
    /// The `HRESULT` returned by the call.
    pub code: i32,
    pub message: String,
}

impl NativeError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

fn detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for NativeError {
    fn from(err: windows::core::Error) -> Self {
        NativeError::new(err.code().0, err.message().to_string())
    }
}

pub type NativeResult<T> = std::result::Result<T, NativeError>;

/// Errors surfaced by the desktop directory and desktop handles.
#[derive(Debug, Error)]
pub enum DesktopError {
    /// A null window handle, an index outside the desktop list, or a window
    /// without a live owning process.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The shell services could not be activated. Nothing works without them.
    #[error("Virtual desktop service unavailable: {0}")]
    NativeServiceUnavailable(String),
    /// The shell refused an operation. Window moves report one failure per
    /// attempted path.
    #[error("Shell rejected '{operation}'{}", joined(.failures))]
    OperationRejected {
        operation: &'static str,
        failures: Vec<NativeError>,
    },
}

fn joined(failures: &[NativeError]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let list: Vec<String> = failures.iter().map(ToString::to_string).collect();
    format!(": {}", list.join("; "))
}

impl DesktopError {
    pub(crate) fn rejected(operation: &'static str) -> impl FnOnce(NativeError) -> DesktopError {
        move |err| DesktopError::OperationRejected {
            operation,
            failures: vec![err],
        }
    }
}

pub type Result<T> = std::result::Result<T, DesktopError>;
