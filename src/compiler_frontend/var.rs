use crate::compiler_frontend::binding_table::BindingTable;
use crate::compiler_frontend::text_slice::TextSlice;
use std::fmt;

/// A reference to a function, local, global, type, import or label.
/// Either written as a `$name` that still needs resolving, or as a plain index.
#[derive(Debug, Clone, PartialEq)]
pub enum Var {
    Name(TextSlice),
    Index(u32),
}

impl Var {
    pub fn name(name: &str) -> Self {
        Var::Name(TextSlice::from(name))
    }

    /// Resolves this reference against `table`.
    ///
    /// Index references are returned as written. They are not checked against
    /// the length of whatever list the table indexes, the caller does that.
    #[inline]
    pub fn resolve(&self, table: &BindingTable) -> Option<u32> {
        resolve(table, self)
    }
}

impl From<u32> for Var {
    fn from(index: u32) -> Self {
        Var::Index(index)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Name(name) => write!(f, "{name}"),
            Var::Index(index) => write!(f, "{index}"),
        }
    }
}

pub fn resolve(table: &BindingTable, var: &Var) -> Option<u32> {
    match var {
        Var::Name(name) => table.lookup(name),
        Var::Index(index) => Some(*index),
    }
}
