pub mod module_entities;
pub mod wasm_module;

#[cfg(test)]
mod tests;
