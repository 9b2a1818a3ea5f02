use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Eq, Hash, PartialEq, Clone, Copy)]
pub enum ErrorMetaDataKey {
    CompilationStage,

    // Which table or entity the failure happened in
    BindingTable,
    EntityKind,
    RequestedCapacity,

    // Config information
    ConfigKey,
    ExpectedValue,

    PrimarySuggestion,
}

#[derive(Debug)]
pub struct CompilerError {
    pub msg: String,

    // Only set for errors that came from reading a file (config loading)
    pub file_path: Option<PathBuf>,
    pub error_type: ErrorType,

    // Extra structured information about what went wrong
    pub metadata: HashMap<ErrorMetaDataKey, &'static str>,
}

impl CompilerError {
    pub fn new(msg: impl Into<String>, error_type: ErrorType) -> CompilerError {
        CompilerError {
            msg: msg.into(),
            file_path: None,
            error_type,
            metadata: HashMap::new(),
        }
    }

    pub fn with_file_path(mut self, file_path: PathBuf) -> Self {
        self.file_path = Some(file_path);
        self
    }

    pub fn with_error_type(mut self, error_type: ErrorType) -> Self {
        self.error_type = error_type;
        self
    }

    pub fn new_metadata_entry(&mut self, key: ErrorMetaDataKey, value: &'static str) {
        self.metadata.insert(key, value);
    }

    /// Storage for a binding table, vector or node could not be reserved.
    /// The surrounding system treats these as fatal.
    pub fn new_allocation_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Allocation)
    }

    /// Create a compiler error (internal bug, not user's fault)
    pub fn compiler_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Compiler)
    }

    pub fn new_config_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Config)
    }

    pub fn file_error(path: &Path, msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::File).with_file_path(path.to_path_buf())
    }

    pub fn new_file_error(
        path: &Path,
        msg: impl Into<String>,
        metadata: HashMap<ErrorMetaDataKey, &'static str>,
    ) -> Self {
        CompilerError {
            msg: msg.into(),
            file_path: Some(path.to_path_buf()),
            error_type: ErrorType::File,
            metadata,
        }
    }
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", error_type_to_str(&self.error_type), self.msg)
    }
}

impl std::error::Error for CompilerError {}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ErrorType {
    Allocation,
    Config,
    File,
    Compiler,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::Allocation => "Out Of Memory",
        ErrorType::Config => "Malformed Config",
        ErrorType::File => "File Error",
        ErrorType::Compiler => "Compiler Bug",
    }
}

/// Returns a new CompilerError for storage that could not be reserved.
///
/// Usage:
/// `return_allocation_error!("message", { BindingTable => "func_bindings", RequestedCapacity => "16" })`;
#[macro_export]
macro_rules! return_allocation_error {
    ($msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError {
            msg: $msg.into(),
            file_path: None,
            error_type: $crate::compiler_frontend::compiler_errors::ErrorType::Allocation,
            metadata: {
                let mut map = std::collections::HashMap::new();
                $(
                    map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value);
                )*
                map
            },
        })
    };
    ($msg:expr) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::new_allocation_error($msg))
    };
}

/// Returns a new CompilerError for a config value that can't be used.
///
/// Usage: `return_config_error!("message", { ConfigKey => "initial_binding_capacity" })`;
#[macro_export]
macro_rules! return_config_error {
    ($msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError {
            msg: $msg.into(),
            file_path: None,
            error_type: $crate::compiler_frontend::compiler_errors::ErrorType::Config,
            metadata: {
                let mut map = std::collections::HashMap::new();
                $( map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value); )*
                map
            },
        })
    };
    ($msg:expr) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::new_config_error($msg))
    };
}

/// Returns a new CompilerError
///
/// Usage: `return_file_error!(path, "message", { metadata })`;
#[macro_export]
macro_rules! return_file_error {
    ($path:expr, $msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {{
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::new_file_error(
            $path,
            $msg,
            {
                let mut map = std::collections::HashMap::new();
                $( map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value); )*
                map
            },
        ));
    }};
    ($path:expr, $msg:expr) => {{
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::file_error(
            $path, $msg,
        ));
    }};
}

/// Returns a new CompilerError for internal compiler bugs.
///
/// These are broken invariants inside this crate, never a problem with the input.
#[macro_export]
macro_rules! return_compiler_error {
    ($msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError {
            msg: $msg.into(),
            file_path: None,
            error_type: $crate::compiler_frontend::compiler_errors::ErrorType::Compiler,
            metadata: {
                let mut map = std::collections::HashMap::new();
                $( map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value); )*
                map
            },
        })
    };
    ($msg:expr) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::compiler_error($msg))
    };
}
