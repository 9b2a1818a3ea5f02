use crate::ast_log;
use crate::compiler_frontend::ast::ast_nodes::Expr;
use crate::compiler_frontend::binding_table::BindingTable;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::text_slice::TextSlice;
use crate::compiler_frontend::var::{Var, resolve};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    // Jump into one of the tableswitch's own cases
    Case,
    // Branch out to an enclosing label
    Br,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub kind: TargetKind,
    pub var: Var,
}

impl Target {
    pub fn case(var: Var) -> Self {
        Self {
            kind: TargetKind::Case,
            var,
        }
    }

    pub fn br(var: Var) -> Self {
        Self {
            kind: TargetKind::Br,
            var,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub label: Option<TextSlice>,
    pub exprs: Vec<Expr>,
}

/// `tableswitch $label (key) (table targets...) default (case $name exprs...)...`
///
/// `case_bindings` maps each named case to its position in `cases`.
/// The names in it are the same allocations as the case labels, not copies.
#[derive(Debug, Clone)]
pub struct Tableswitch {
    pub label: Option<TextSlice>,
    pub expr: Box<Expr>,
    pub targets: Vec<Target>,
    pub default_target: Target,
    pub case_bindings: BindingTable,
    pub cases: Vec<Case>,
}

impl Tableswitch {
    /// Builds the node and binds every named case label to its position
    pub fn new(
        label: Option<TextSlice>,
        expr: Expr,
        targets: Vec<Target>,
        default_target: Target,
        cases: Vec<Case>,
    ) -> Result<Self, CompilerError> {
        let mut case_bindings = BindingTable::new();
        for (index, case) in cases.iter().enumerate() {
            if let Some(case_label) = &case.label {
                case_bindings.bind(case_label.clone(), index as u32)?;
            }
        }

        ast_log!("Tableswitch with ", cases.len(), " cases and ", targets.len(), " targets");

        Ok(Self {
            label,
            expr: Box::new(expr),
            targets,
            default_target,
            case_bindings,
            cases,
        })
    }

    pub fn case_index_by_var(&self, var: &Var) -> Option<u32> {
        resolve(&self.case_bindings, var)
    }

    /// The case a `Case` target jumps to. `None` for branch targets or unknown cases.
    pub fn case_for_target(&self, target: &Target) -> Option<&Case> {
        if target.kind != TargetKind::Case {
            return None;
        }

        let index = self.case_index_by_var(&target.var)?;
        self.cases.get(index as usize)
    }
}

// The case table is derived from the cases, so it takes no part in equality
impl PartialEq for Tableswitch {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.expr == other.expr
            && self.targets == other.targets
            && self.default_target == other.default_target
            && self.cases == other.cases
    }
}
