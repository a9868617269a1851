//! Assembly generation: lowers three-address code into x86-64 NASM text
//! addressed at Linux, plus the small `Linker` wrapper the driver uses to
//! hand that text to `nasm` and `ld`.
//!
//! There's no intermediate register-allocated form here — the operand stack
//! the IR already models maps directly onto the machine stack, so
//! generation is a single linear pass. See [`asm::AsmGenerator`].

mod asm;
mod error;
mod frame;
pub mod linker;

pub use asm::AsmGenerator;
pub use error::{GenError, Result};

use ppc_ir::Instr;

/// Generates the complete NASM source for a lowered program.
pub fn generate(instrs: &[Instr]) -> Result<String> {
    AsmGenerator::new().generate(instrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use ppc_lex::Lexer;
    use ppc_par::Parser;

    fn compile(src: &str) -> String {
        let arena = Bump::new();
        let tokens = Lexer::new(src).tokenize().expect("lex ok");
        let program = Parser::new(&arena, tokens).parse_program().expect("parse ok");
        let instrs = ppc_ir::lower_program(&program).expect("lower ok");
        generate(&instrs).expect("gen ok")
    }

    #[test]
    fn emits_start_label_and_section() {
        let asm = compile("kończwaść ( [zero] )");
        assert!(asm.contains("global _start"));
        assert!(asm.contains("_start:"));
        assert!(asm.contains("%include \"printer.asm\""));
    }

    #[test]
    fn while_loop_produces_matching_labels() {
        let asm = compile(
            "zmienna całkowita `i` równa [zero] \
             powtarzaj jeśli ( `i` mniejsze [pięć] ) : { przerwij }",
        );
        let label_defs = asm.matches(":\n").count();
        assert!(label_defs >= 2);
    }

    #[test]
    fn array_program_allocates_and_indexes() {
        let asm = compile(
            "tablica całkowita `tab` równa { [jeden] , [dwa] } \
             kończwaść ( `tab` element [zero] )",
        );
        assert!(asm.contains("shl rbx, 3"));
    }
}
