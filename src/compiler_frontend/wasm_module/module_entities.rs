use crate::compiler_frontend::ast::ast_nodes::Expr;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::named_types::{NamedTypeList, ValueType, extend_type_bindings};
use crate::compiler_frontend::text_slice::TextSlice;
use crate::compiler_frontend::var::{Var, resolve};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FuncSignature {
    pub result_type: ValueType,
    pub param_types: Vec<ValueType>,
}

#[derive(Debug, Clone)]
pub struct Func {
    pub name: Option<TextSlice>,

    // Set when the func was declared with `(type $t)`
    pub type_var: Option<Var>,

    pub params: NamedTypeList,
    pub result_type: ValueType,
    pub locals: NamedTypeList,

    // Params followed by locals, the index space get_local/set_local use.
    // Its names are shared with `params` and `locals`.
    pub params_and_locals: NamedTypeList,

    pub exprs: Vec<Expr>,
}

impl Func {
    pub fn new(
        name: Option<TextSlice>,
        type_var: Option<Var>,
        params: NamedTypeList,
        result_type: ValueType,
        locals: NamedTypeList,
        exprs: Vec<Expr>,
    ) -> Result<Self, CompilerError> {
        let mut params_and_locals = NamedTypeList::new();
        extend_type_bindings(&mut params_and_locals, &params)?;
        extend_type_bindings(&mut params_and_locals, &locals)?;

        Ok(Self {
            name,
            type_var,
            params,
            result_type,
            locals,
            params_and_locals,
            exprs,
        })
    }

    pub fn local_index_by_var(&self, var: &Var) -> Option<u32> {
        resolve(&self.params_and_locals.bindings, var)
    }

    /// Type of a param or local, `None` if the var doesn't resolve or is out of range
    pub fn local_type_by_var(&self, var: &Var) -> Option<ValueType> {
        let index = self.local_index_by_var(var)?;
        self.params_and_locals.types.get(index as usize).copied()
    }

    pub fn signature(&self) -> FuncSignature {
        FuncSignature {
            result_type: self.result_type,
            param_types: self.params.types.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub name: Option<TextSlice>,
    pub module_name: TextSlice,
    pub func_name: TextSlice,

    // Either a reference to a declared func type or an inline signature
    pub type_var: Option<Var>,
    pub func_sig: FuncSignature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    pub name: TextSlice,
    pub var: Var,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncType {
    pub name: Option<TextSlice>,
    pub sig: FuncSignature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub addr: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Memory {
    pub initial_pages: u32,
    pub max_pages: u32,
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
pub enum ModuleField {
    Func(Func),
    Import(Import),
    Export(Export),
    // Function table, one var per element
    Table(Vec<Var>),
    FuncType(FuncType),
    Memory(Memory),
    Global(NamedTypeList),
    Start(Var),
}

impl ModuleField {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ModuleField::Func(_) => "func",
            ModuleField::Import(_) => "import",
            ModuleField::Export(_) => "export",
            ModuleField::Table(_) => "table",
            ModuleField::FuncType(_) => "type",
            ModuleField::Memory(_) => "memory",
            ModuleField::Global(_) => "global",
            ModuleField::Start(_) => "start",
        }
    }
}
