use crate::compiler_frontend::binding_table::BindingTable;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::text_slice::TextSlice;
use crate::return_allocation_error;
use serde::Serialize;
use wasm_encoder::ValType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Void,
    I32,
    I64,
    F32,
    F64,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Void => "void",
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        }
    }

    /// The encoder's type for this value. Void has no value, so has no encoder type.
    pub fn to_wasm_type(self) -> Option<ValType> {
        match self {
            ValueType::Void => None,
            ValueType::I32 => Some(ValType::I32),
            ValueType::I64 => Some(ValType::I64),
            ValueType::F32 => Some(ValType::F32),
            ValueType::F64 => Some(ValType::F64),
        }
    }
}

/// A list of types where some positions have names.
/// Used for function params, locals and module globals.
#[derive(Debug, Clone, Default)]
pub struct NamedTypeList {
    pub types: Vec<ValueType>,
    pub bindings: BindingTable,
}

impl NamedTypeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a type, binding `name` (if any) to its position
    pub fn push(&mut self, name: Option<TextSlice>, value_type: ValueType) -> Result<(), CompilerError> {
        let index = self.types.len() as u32;
        if self.types.try_reserve(1).is_err() {
            return_allocation_error!("Could not grow type list", {
                CompilationStage => "Named Type List",
            });
        }
        self.types.push(value_type);

        if let Some(name) = name {
            self.bindings.bind(name, index)?;
        }

        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn index_of(&self, name: &TextSlice) -> Option<u32> {
        self.bindings.lookup(name)
    }
}

/// Appends `src` onto `dst`.
///
/// The types are copied. Every name bound in `src` is bound again in `dst`,
/// shifted by the number of types `dst` had before. The names are shared with `src`.
pub fn extend_type_bindings(dst: &mut NamedTypeList, src: &NamedTypeList) -> Result<(), CompilerError> {
    let last_type = dst.types.len() as u32;

    if dst.types.try_reserve(src.types.len()).is_err() {
        return_allocation_error!("Could not extend type list", {
            CompilationStage => "Named Type List",
        });
    }
    dst.types.extend_from_slice(&src.types);

    for binding in src.bindings.iter() {
        dst.bindings.bind(binding.name.clone(), binding.index + last_type)?;
    }

    Ok(())
}
