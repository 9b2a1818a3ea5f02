use crate::compiler_frontend::binding_table::BindingTable;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::named_types::{NamedTypeList, ValueType, extend_type_bindings};
use crate::compiler_frontend::text_slice::{TextSlice, slices_are_equal};
use crate::compiler_frontend::var::{Var, resolve};
use crate::compiler_frontend::wasm_module::module_entities::{
    Export, Func, FuncType, Import, Memory, ModuleField,
};
use crate::settings::{MINIMUM_LIKELY_EXPORTS, MINIMUM_LIKELY_FUNCS};
use crate::{module_log, return_allocation_error};

/// A module as a list of fields in declaration order.
///
/// `fields` is the only owner of every entity. The per-kind lists below are positions
/// into `fields`, and the binding tables map names to positions in those lists
/// (func `$name` -> index into `funcs` and so on), so none of them own anything.
#[derive(Debug, Clone, Default)]
pub struct Module {
    fields: Vec<ModuleField>,

    funcs: Vec<usize>,
    imports: Vec<usize>,
    exports: Vec<usize>,
    func_types: Vec<usize>,
    table: Option<usize>,
    memory: Option<usize>,
    start: Option<usize>,

    pub func_bindings: BindingTable,
    pub import_bindings: BindingTable,
    pub export_bindings: BindingTable,
    pub func_type_bindings: BindingTable,

    // Every global field concatenated, names shared with the fields
    pub globals: NamedTypeList,
}

impl Module {
    pub fn new() -> Self {
        Self {
            funcs: Vec::with_capacity(MINIMUM_LIKELY_FUNCS),
            exports: Vec::with_capacity(MINIMUM_LIKELY_EXPORTS),
            ..Default::default()
        }
    }

    pub fn fields(&self) -> &[ModuleField] {
        &self.fields
    }

    /// Appends a field and registers it in the matching list and binding table.
    /// Named entities are bound to their position in their own list.
    pub fn append_field(&mut self, field: ModuleField) -> Result<(), CompilerError> {
        let field_index = self.fields.len();
        if self.fields.try_reserve(1).is_err() {
            return_allocation_error!("Could not grow module field list", {
                EntityKind => field.kind_name(),
            });
        }

        match &field {
            ModuleField::Func(func) => {
                register(&mut self.funcs, &mut self.func_bindings, func.name.as_ref(), field_index)?;
            }
            ModuleField::Import(import) => {
                register(
                    &mut self.imports,
                    &mut self.import_bindings,
                    import.name.as_ref(),
                    field_index,
                )?;
            }
            ModuleField::Export(export) => {
                register(
                    &mut self.exports,
                    &mut self.export_bindings,
                    Some(&export.name),
                    field_index,
                )?;
            }
            ModuleField::FuncType(func_type) => {
                register(
                    &mut self.func_types,
                    &mut self.func_type_bindings,
                    func_type.name.as_ref(),
                    field_index,
                )?;
            }
            ModuleField::Global(globals) => {
                // Extend a copy so a failure leaves the existing globals untouched
                let mut extended = self.globals.clone();
                extend_type_bindings(&mut extended, globals)?;
                self.globals = extended;
            }

            // A later declaration replaces an earlier one, rejecting duplicates is up to validation
            ModuleField::Table(_) => self.table = Some(field_index),
            ModuleField::Memory(_) => self.memory = Some(field_index),
            ModuleField::Start(_) => self.start = Some(field_index),
        }

        module_log!("Module field ", field.kind_name(), " at position ", field_index);

        self.fields.push(field);
        Ok(())
    }

    pub fn add_func(&mut self, func: Func) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Func(func))
    }

    pub fn add_import(&mut self, import: Import) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Import(import))
    }

    pub fn add_export(&mut self, export: Export) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Export(export))
    }

    pub fn add_func_type(&mut self, func_type: FuncType) -> Result<(), CompilerError> {
        self.append_field(ModuleField::FuncType(func_type))
    }

    pub fn add_table(&mut self, elements: Vec<Var>) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Table(elements))
    }

    pub fn add_memory(&mut self, memory: Memory) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Memory(memory))
    }

    pub fn add_global(&mut self, globals: NamedTypeList) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Global(globals))
    }

    pub fn add_start(&mut self, var: Var) -> Result<(), CompilerError> {
        self.append_field(ModuleField::Start(var))
    }

    // -----------------------
    //  Flat views
    // -----------------------
    pub fn func(&self, index: usize) -> Option<&Func> {
        match self.fields.get(*self.funcs.get(index)?)? {
            ModuleField::Func(func) => Some(func),
            _ => None,
        }
    }

    pub fn import(&self, index: usize) -> Option<&Import> {
        match self.fields.get(*self.imports.get(index)?)? {
            ModuleField::Import(import) => Some(import),
            _ => None,
        }
    }

    pub fn export(&self, index: usize) -> Option<&Export> {
        match self.fields.get(*self.exports.get(index)?)? {
            ModuleField::Export(export) => Some(export),
            _ => None,
        }
    }

    pub fn func_type(&self, index: usize) -> Option<&FuncType> {
        match self.fields.get(*self.func_types.get(index)?)? {
            ModuleField::FuncType(func_type) => Some(func_type),
            _ => None,
        }
    }

    pub fn funcs(&self) -> impl Iterator<Item = &Func> {
        (0..self.funcs.len()).filter_map(|index| self.func(index))
    }

    pub fn imports(&self) -> impl Iterator<Item = &Import> {
        (0..self.imports.len()).filter_map(|index| self.import(index))
    }

    pub fn exports(&self) -> impl Iterator<Item = &Export> {
        (0..self.exports.len()).filter_map(|index| self.export(index))
    }

    pub fn func_types(&self) -> impl Iterator<Item = &FuncType> {
        (0..self.func_types.len()).filter_map(|index| self.func_type(index))
    }

    #[inline]
    pub fn num_funcs(&self) -> usize {
        self.funcs.len()
    }

    #[inline]
    pub fn num_imports(&self) -> usize {
        self.imports.len()
    }

    #[inline]
    pub fn num_exports(&self) -> usize {
        self.exports.len()
    }

    #[inline]
    pub fn num_func_types(&self) -> usize {
        self.func_types.len()
    }

    pub fn table(&self) -> Option<&[Var]> {
        match self.fields.get(self.table?)? {
            ModuleField::Table(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn memory(&self) -> Option<&Memory> {
        match self.fields.get(self.memory?)? {
            ModuleField::Memory(memory) => Some(memory),
            _ => None,
        }
    }

    pub fn start(&self) -> Option<&Var> {
        match self.fields.get(self.start?)? {
            ModuleField::Start(var) => Some(var),
            _ => None,
        }
    }

    // -----------------------
    //  Var resolution
    // -----------------------
    pub fn func_index_by_var(&self, var: &Var) -> Option<u32> {
        resolve(&self.func_bindings, var)
    }

    pub fn func_type_index_by_var(&self, var: &Var) -> Option<u32> {
        resolve(&self.func_type_bindings, var)
    }

    pub fn global_index_by_var(&self, var: &Var) -> Option<u32> {
        resolve(&self.globals.bindings, var)
    }

    pub fn import_index_by_var(&self, var: &Var) -> Option<u32> {
        resolve(&self.import_bindings, var)
    }

    /// `None` if the var doesn't resolve or is past the end of the func list
    pub fn func_by_var(&self, var: &Var) -> Option<&Func> {
        self.func(self.func_index_by_var(var)? as usize)
    }

    pub fn func_type_by_var(&self, var: &Var) -> Option<&FuncType> {
        self.func_type(self.func_type_index_by_var(var)? as usize)
    }

    pub fn import_by_var(&self, var: &Var) -> Option<&Import> {
        self.import(self.import_index_by_var(var)? as usize)
    }

    pub fn global_type_by_var(&self, var: &Var) -> Option<ValueType> {
        let index = self.global_index_by_var(var)?;
        self.globals.types.get(index as usize).copied()
    }

    pub fn export_by_name(&self, name: &TextSlice) -> Option<&Export> {
        let index = self.export_bindings.lookup(name)?;
        self.export(index as usize)
    }

    /// True if any export refers to `func`, either by its name or by its index.
    /// Index exports are matched by identity, so `func` must be borrowed from this module.
    pub fn is_func_exported(&self, func: &Func) -> bool {
        self.exports().any(|export| match &export.var {
            Var::Name(name) => slices_are_equal(Some(name), func.name.as_ref()),
            Var::Index(index) => self
                .func(*index as usize)
                .is_some_and(|exported| std::ptr::eq(exported, func)),
        })
    }
}

/// Records a new entity position and binds its name, if it has one
fn register(
    positions: &mut Vec<usize>,
    bindings: &mut BindingTable,
    name: Option<&TextSlice>,
    field_index: usize,
) -> Result<(), CompilerError> {
    let index = positions.len() as u32;
    if positions.try_reserve(1).is_err() {
        return_allocation_error!("Could not grow module entity list", {
            CompilationStage => "Module Assembly",
        });
    }

    if let Some(name) = name {
        bindings.bind(name.clone(), index)?;
    }

    positions.push(field_index);
    Ok(())
}
