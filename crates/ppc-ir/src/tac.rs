//! Three-address code: the linear IR that sits between the AST and the
//! assembly generator.
//!
//! Each [`Instr`] variant corresponds to one of the operation kinds named in
//! the data model; modelling them as a sum type rather than a single
//! `{op, result, arg1, arg2}` struct catches most op/operand-shape mismatches
//! at compile time instead of at `.ppprw`-emission time.

use std::fmt;

use ppc_par::ast::BinOp;

/// A value consumed or produced by an instruction. The three variants are
/// the three disjoint operand spaces named in the data model: numeric
/// constants, stack-resident temporaries, and user-declared names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Const(i64),
    Temp(u32),
    Name(String),
}

impl Operand {
    pub fn name(name: impl Into<String>) -> Self {
        Operand::Name(name.into())
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(n) => write!(f, "{n}"),
            Operand::Temp(n) => write!(f, "t{n}"),
            Operand::Name(n) => write!(f, "{n}"),
        }
    }
}

/// A label target for `jump`/`jump_false`, identified by a monotonically
/// increasing counter — deterministic across runs of the same input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub enum Instr {
    BinOp {
        op: BinOp,
        result: Operand,
        lhs: Operand,
        rhs: Operand,
    },
    LogNot {
        result: Operand,
        operand: Operand,
    },
    /// `assign ident value` — ASMGen dispatches on whether `ident` names a
    /// temporary, an existing local, or a fresh local (see spec of that
    /// stage); IRGen always emits the same instruction shape.
    Assign {
        ident: Operand,
        value: Operand,
    },
    Jump(LabelId),
    JumpFalse {
        cond: Operand,
        label: LabelId,
    },
    Label(LabelId),
    ProgExit(Operand),
    PrintInt(Operand),
    PrintChar(Operand),
    ReadChar {
        result: Operand,
    },
    BgnScope,
    EndScope,
    ArrayAllocate {
        ident: Operand,
        size: Operand,
    },
    ArrayAssign {
        array: Operand,
        index: Operand,
        value: Operand,
    },
    ArrayGet {
        result: Operand,
        array: Operand,
        index: Operand,
    },
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::BinOp { op, result, lhs, rhs } => {
                write!(f, "{result} = {lhs} {} {rhs}", binop_mnemonic(*op))
            }
            Instr::LogNot { result, operand } => write!(f, "{result} = log_not {operand}"),
            Instr::Assign { ident, value } => write!(f, "assign {ident} {value}"),
            Instr::Jump(label) => write!(f, "jump {label}"),
            Instr::JumpFalse { cond, label } => write!(f, "jump_false {cond} {label}"),
            Instr::Label(label) => write!(f, "label {label}"),
            Instr::ProgExit(code) => write!(f, "prog_exit {code}"),
            Instr::PrintInt(v) => write!(f, "print_int {v}"),
            Instr::PrintChar(v) => write!(f, "print_char {v}"),
            Instr::ReadChar { result } => write!(f, "{result} = read_char"),
            Instr::BgnScope => write!(f, "bgn_scope"),
            Instr::EndScope => write!(f, "end_scope"),
            Instr::ArrayAllocate { ident, size } => write!(f, "array_allocate {ident} {size}"),
            Instr::ArrayAssign { array, index, value } => {
                write!(f, "array_assign {array} {index} {value}")
            }
            Instr::ArrayGet { result, array, index } => {
                write!(f, "{result} = array_get {array} {index}")
            }
        }
    }
}

fn binop_mnemonic(op: BinOp) -> &'static str {
    use BinOp::*;
    match op {
        Add => "add",
        Subtract => "sub",
        Multiply => "mul",
        Divide => "div",
        Modulo => "mod",
        Equal => "eq",
        NotEqual => "neq",
        Greater => "gt",
        GreaterEqual => "ge",
        Less => "lt",
        LessEqual => "le",
        LogicalAnd => "and",
        LogicalOr => "or",
    }
}

/// The human-readable `.ppprw` listing: one instruction per line, in
/// emission order.
pub fn render_listing(instrs: &[Instr]) -> String {
    let mut out = String::new();
    for instr in instrs {
        out.push_str(&instr.to_string());
        out.push('\n');
    }
    out
}
