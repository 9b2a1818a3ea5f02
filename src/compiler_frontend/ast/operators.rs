use crate::compiler_frontend::named_types::ValueType;

/// An operator together with the value type it works on (`i32.add`, `f64.lt`...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedOp<K> {
    pub op: K,
    pub value_type: ValueType,
}

impl<K> TypedOp<K> {
    pub fn new(op: K, value_type: ValueType) -> Self {
        Self { op, value_type }
    }
}

pub type BinaryOp = TypedOp<BinaryOpKind>;
pub type UnaryOp = TypedOp<UnaryOpKind>;
pub type CompareOp = TypedOp<CompareOpKind>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOpKind {
    Add,
    Sub,
    Mul,
    DivS,
    DivU,
    RemS,
    RemU,
    And,
    Or,
    Xor,
    Shl,
    ShrS,
    ShrU,

    // Float only
    Div,
    Min,
    Max,
    Copysign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOpKind {
    Clz,
    Ctz,
    Popcnt,
    Eqz,

    // Float only
    Neg,
    Abs,
    Ceil,
    Floor,
    Trunc,
    Nearest,
    Sqrt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOpKind {
    Eq,
    Ne,
    LtS,
    LtU,
    LeS,
    LeU,
    GtS,
    GtU,
    GeS,
    GeU,

    // Float only
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOpKind {
    ExtendS,
    ExtendU,
    Wrap,
    TruncS,
    TruncU,
    ConvertS,
    ConvertU,
    Promote,
    Demote,
    Reinterpret,
}

/// `i64.extend_s/i32` is `{ op: ExtendS, value_type: I64, from_type: I32 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOp {
    pub op: ConvertOpKind,
    pub value_type: ValueType,
    pub from_type: ValueType,
}

/// Width of a load or store. `Full` uses the whole width of the value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemSize {
    Full,
    Bits8,
    Bits16,
    Bits32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemAccess {
    pub value_type: ValueType,
    pub size: MemSize,

    // Only meaningful for narrow loads
    pub signed: bool,
    pub align: u32,
    pub offset: u64,
}

impl MemAccess {
    /// Natural alignment, no offset, full width
    pub fn full(value_type: ValueType) -> Self {
        let align = match value_type {
            ValueType::I64 | ValueType::F64 => 8,
            _ => 4,
        };

        Self {
            value_type,
            size: MemSize::Full,
            signed: false,
            align,
            offset: 0,
        }
    }
}
