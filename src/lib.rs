pub mod settings;

pub mod compiler_frontend;

pub use compiler_frontend::ast::ast_nodes::{Const, Expr};
pub use compiler_frontend::binding_table::{Binding, BindingTable};
pub use compiler_frontend::compiler_errors::{CompilerError, ErrorType};
pub use compiler_frontend::memory_dump::{dump_memory, print_memory};
pub use compiler_frontend::named_types::{NamedTypeList, ValueType, extend_type_bindings};
pub use compiler_frontend::script::{Command, Invoke, Script};
pub use compiler_frontend::text_slice::TextSlice;
pub use compiler_frontend::var::Var;
pub use compiler_frontend::wasm_module::wasm_module::Module;
pub use settings::Config;
