// BINDING TABLE LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_bindings")]
macro_rules! binding_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_bindings"))]
macro_rules! binding_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// AST LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_ast")]
macro_rules! ast_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_ast"))]
macro_rules! ast_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// MODULE ASSEMBLY LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_module")]
macro_rules! module_log {
    ($($arg:tt)*) => {
        saying::say!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_module"))]
macro_rules! module_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}
