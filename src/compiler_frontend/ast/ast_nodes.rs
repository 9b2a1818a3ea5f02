use crate::compiler_frontend::ast::operators::{BinaryOp, CompareOp, ConvertOp, MemAccess, UnaryOp};
use crate::compiler_frontend::ast::tableswitch::Tableswitch;
use crate::compiler_frontend::named_types::ValueType;
use crate::compiler_frontend::text_slice::TextSlice;
use crate::compiler_frontend::var::Var;
use serde::Serialize;

/// A constant value. Floats are kept as raw bits so NaN payloads survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Const {
    I32(u32),
    I64(u64),
    F32(u32),
    F64(u64),
}

impl Const {
    pub fn f32(value: f32) -> Self {
        Const::F32(value.to_bits())
    }

    pub fn f64(value: f64) -> Self {
        Const::F64(value.to_bits())
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Const::I32(_) => ValueType::I32,
            Const::I64(_) => ValueType::I64,
            Const::F32(_) => ValueType::F32,
            Const::F64(_) => ValueType::F64,
        }
    }
}

/// One instruction.
///
/// Every node owns its children and vars outright, so dropping the root releases the whole tree.
/// The only shared memory is the case labels a tableswitch also binds in its case table.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Block {
        label: Option<TextSlice>,
        exprs: Vec<Expr>,
    },
    Br {
        var: Var,
        expr: Option<Box<Expr>>,
    },
    BrIf {
        var: Var,
        cond: Box<Expr>,
        expr: Option<Box<Expr>>,
    },
    Call {
        var: Var,
        args: Vec<Expr>,
    },
    CallImport {
        var: Var,
        args: Vec<Expr>,
    },
    CallIndirect {
        // Function type of the callee
        var: Var,
        // Table index to call through
        expr: Box<Expr>,
        args: Vec<Expr>,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Const(Const),
    Convert {
        op: ConvertOp,
        expr: Box<Expr>,
    },
    GetLocal {
        var: Var,
    },
    GrowMemory {
        expr: Box<Expr>,
    },
    HasFeature {
        text: TextSlice,
    },
    If {
        cond: Box<Expr>,
        true_: Box<Expr>,
    },
    IfElse {
        cond: Box<Expr>,
        true_: Box<Expr>,
        false_: Box<Expr>,
    },
    Load {
        access: MemAccess,
        addr: Box<Expr>,
    },
    LoadGlobal {
        var: Var,
    },
    Loop {
        inner: Option<TextSlice>,
        outer: Option<TextSlice>,
        exprs: Vec<Expr>,
    },
    MemorySize,
    Nop,
    Return {
        expr: Option<Box<Expr>>,
    },
    Select {
        value_type: ValueType,
        cond: Box<Expr>,
        true_: Box<Expr>,
        false_: Box<Expr>,
    },
    SetLocal {
        var: Var,
        expr: Box<Expr>,
    },
    Store {
        access: MemAccess,
        addr: Box<Expr>,
        value: Box<Expr>,
    },
    StoreGlobal {
        var: Var,
        expr: Box<Expr>,
    },
    Tableswitch(Box<Tableswitch>),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Unreachable,
}

impl Expr {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Binary { .. } => "binary",
            Expr::Block { .. } => "block",
            Expr::Br { .. } => "br",
            Expr::BrIf { .. } => "br_if",
            Expr::Call { .. } => "call",
            Expr::CallImport { .. } => "call_import",
            Expr::CallIndirect { .. } => "call_indirect",
            Expr::Compare { .. } => "compare",
            Expr::Const(_) => "const",
            Expr::Convert { .. } => "convert",
            Expr::GetLocal { .. } => "get_local",
            Expr::GrowMemory { .. } => "grow_memory",
            Expr::HasFeature { .. } => "has_feature",
            Expr::If { .. } => "if",
            Expr::IfElse { .. } => "if_else",
            Expr::Load { .. } => "load",
            Expr::LoadGlobal { .. } => "load_global",
            Expr::Loop { .. } => "loop",
            Expr::MemorySize => "memory_size",
            Expr::Nop => "nop",
            Expr::Return { .. } => "return",
            Expr::Select { .. } => "select",
            Expr::SetLocal { .. } => "set_local",
            Expr::Store { .. } => "store",
            Expr::StoreGlobal { .. } => "store_global",
            Expr::Tableswitch(_) => "tableswitch",
            Expr::Unary { .. } => "unary",
            Expr::Unreachable => "unreachable",
        }
    }

    /// Direct children in evaluation order.
    /// For a tableswitch this is the key expression followed by every case body.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Binary { left, right, .. } | Expr::Compare { left, right, .. } => {
                vec![&**left, &**right]
            }
            Expr::Block { exprs, .. } | Expr::Loop { exprs, .. } => exprs.iter().collect(),
            Expr::Br { expr, .. } | Expr::Return { expr } => expr.as_deref().into_iter().collect(),
            Expr::BrIf { cond, expr, .. } => {
                let mut children = vec![&**cond];
                children.extend(expr.as_deref());
                children
            }
            Expr::Call { args, .. } | Expr::CallImport { args, .. } => args.iter().collect(),
            Expr::CallIndirect { expr, args, .. } => {
                let mut children = vec![&**expr];
                children.extend(args.iter());
                children
            }
            Expr::Convert { expr, .. }
            | Expr::GrowMemory { expr }
            | Expr::SetLocal { expr, .. }
            | Expr::StoreGlobal { expr, .. }
            | Expr::Unary { expr, .. } => vec![&**expr],
            Expr::If { cond, true_ } => vec![&**cond, &**true_],
            Expr::IfElse {
                cond,
                true_,
                false_,
            }
            | Expr::Select {
                cond,
                true_,
                false_,
                ..
            } => vec![&**cond, &**true_, &**false_],
            Expr::Load { addr, .. } => vec![&**addr],
            Expr::Store { addr, value, .. } => vec![&**addr, &**value],
            Expr::Tableswitch(tableswitch) => {
                let mut children = vec![&*tableswitch.expr];
                for case in &tableswitch.cases {
                    children.extend(case.exprs.iter());
                }
                children
            }
            Expr::Const(_)
            | Expr::GetLocal { .. }
            | Expr::HasFeature { .. }
            | Expr::LoadGlobal { .. }
            | Expr::MemorySize
            | Expr::Nop
            | Expr::Unreachable => Vec::new(),
        }
    }

    /// Number of nodes in this tree, including itself
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::node_count)
            .sum::<usize>()
    }
}
