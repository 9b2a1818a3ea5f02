pub mod ast;
pub mod wasm_module;

pub mod compiler_messages {
    pub mod compiler_dev_logging;
    pub mod compiler_errors;
    pub mod display_messages;
}
pub use compiler_messages::compiler_errors;
pub use compiler_messages::display_messages;

pub mod binding_table;
pub mod memory_dump;
pub mod named_types;
pub mod script;
pub mod text_slice;
pub mod var;

#[cfg(test)]
mod tests;
