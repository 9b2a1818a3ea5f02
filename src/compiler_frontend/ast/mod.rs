pub mod ast_nodes;
pub mod operators;
pub mod tableswitch;
