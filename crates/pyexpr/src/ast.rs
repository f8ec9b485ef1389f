use num_bigint::BigInt;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    None,
    Bool(bool),
    Integer(BigInt),
    Float(f64),
    String(String),
    List(Vec<AstNode>),
    Tuple(Vec<AstNode>),
    Dict(Vec<(AstNode, AstNode)>),
    Name(String),
    Unary {
        op: UnaryOp,
        operand: Box<AstNode>,
    },
    Binary {
        left: Box<AstNode>,
        op: BinaryOp,
        right: Box<AstNode>,
    },
    /// `a < b <= c`: one node so evaluation can stop at the first false link.
    Compare {
        left: Box<AstNode>,
        comparisons: Vec<(CompareOp, AstNode)>,
    },
    BoolOp {
        left: Box<AstNode>,
        op: BoolOp,
        right: Box<AstNode>,
    },
    Conditional {
        condition: Box<AstNode>,
        if_true: Box<AstNode>,
        if_false: Box<AstNode>,
    },
    Call {
        callee: Box<AstNode>,
        args: Vec<AstNode>,
        kwargs: Vec<(String, AstNode)>,
    },
    Lookup {
        target: Box<AstNode>,
        key: Box<AstNode>,
    },
    ObjLookup {
        target: Box<AstNode>,
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Invert,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
    Is,
    IsNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::Invert => "~",
            UnaryOp::Not => "not",
        }
    }
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::FloorDiv => "//",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
        }
    }
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::In => "in",
            CompareOp::NotIn => "not in",
            CompareOp::Is => "is",
            CompareOp::IsNot => "is not",
        }
    }
}

impl BoolOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        }
    }
}

/// Binding powers shared by the parser and the formatter.
pub mod precedence {
    use super::{AstNode, BinaryOp, BoolOp, UnaryOp};

    pub const CONDITIONAL: u8 = 20;
    pub const OR: u8 = 30;
    pub const AND: u8 = 40;
    pub const NOT: u8 = 50;
    pub const COMPARISON: u8 = 60;
    pub const BIT_OR: u8 = 70;
    pub const BIT_XOR: u8 = 80;
    pub const BIT_AND: u8 = 90;
    pub const SHIFT: u8 = 100;
    pub const ADDITIVE: u8 = 110;
    pub const MULTIPLICATIVE: u8 = 120;
    pub const UNARY: u8 = 130;
    pub const POWER: u8 = 140;
    pub const POSTFIX: u8 = 150;
    /// Atoms never need parentheses.
    pub const ATOM: u8 = u8::MAX;

    pub fn binary(op: BinaryOp) -> u8 {
        match op {
            BinaryOp::BitOr => BIT_OR,
            BinaryOp::BitXor => BIT_XOR,
            BinaryOp::BitAnd => BIT_AND,
            BinaryOp::Shl | BinaryOp::Shr => SHIFT,
            BinaryOp::Add | BinaryOp::Sub => ADDITIVE,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod => MULTIPLICATIVE,
            BinaryOp::Pow => POWER,
        }
    }

    pub fn boolean(op: BoolOp) -> u8 {
        match op {
            BoolOp::Or => OR,
            BoolOp::And => AND,
        }
    }

    pub fn unary(op: UnaryOp) -> u8 {
        match op {
            UnaryOp::Not => NOT,
            UnaryOp::Neg | UnaryOp::Pos | UnaryOp::Invert => UNARY,
        }
    }

    /// Binding power of the operator at the root of `node`.
    pub fn of(node: &AstNode) -> u8 {
        match node {
            AstNode::Conditional { .. } => CONDITIONAL,
            AstNode::BoolOp { op, .. } => boolean(*op),
            AstNode::Unary { op, .. } => unary(*op),
            AstNode::Compare { .. } => COMPARISON,
            AstNode::Binary { op, .. } => binary(*op),
            AstNode::Call { .. } | AstNode::Lookup { .. } | AstNode::ObjLookup { .. } => POSTFIX,
            _ => ATOM,
        }
    }
}
