//! IR generation: lowers a checked AST into a flat three-address-code
//! instruction list, checking identifier and type rules along the way.
//!
//! There is no separate "semantic analysis" pass ahead of lowering — types
//! and declarations are checked on the fly as each node is lowered, and the
//! first violation aborts the whole pass (see [`ppc_util::SemanticError`]).

mod lower;
pub mod symtab;
pub mod tac;

use ppc_par::ast::Program;
use ppc_util::SemanticResult;

pub use lower::IrGen;
pub use tac::{render_listing, Instr, LabelId, Operand};

/// Lowers a parsed program to its three-address-code form.
pub fn lower_program(program: &Program<'_>) -> SemanticResult<Vec<Instr>> {
    IrGen::new().lower_program(program)
}
