//! Assembly generation: walks a [`Instr`] stream once, emitting x86-64 NASM
//! text for a single flat `_start`.
//!
//! There's no register allocator and no basic-block graph — the source
//! language's operand stack maps directly onto the runtime stack, so
//! generation is a straight line through the instruction list with one
//! `match` arm per op. `Frame` is the only piece of state carried between
//! instructions.

use ppc_ir::{Instr, LabelId, Operand};
use ppc_par::ast::BinOp;

use crate::error::{GenError, Result};
use crate::frame::{Frame, HEAP_BASE_SLOT_NAME};

pub struct AsmGenerator {
    out: String,
    frame: Frame,
}

impl AsmGenerator {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            frame: Frame::new(),
        }
    }

    /// Generates the complete `.asm` text for `instrs`.
    pub fn generate(mut self, instrs: &[Instr]) -> Result<String> {
        self.prologue();
        for instr in instrs {
            self.emit(instr)?;
        }
        Ok(self.out)
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.out.push_str("    ");
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn raw(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// `%include`s the print-int helper, then queries the break pointer once
    /// before any user code runs, so it can be used as the outermost heap
    /// checkpoint for the lifetime of the program.
    fn prologue(&mut self) {
        self.raw("%include \"printer.asm\"");
        self.raw("global _start");
        self.raw("section .text");
        self.raw("_start:");
        self.line("mov rax, 12");
        self.line("xor rdi, rdi");
        self.line("syscall");
        self.line("push rax");
        let base = self.frame.declare(HEAP_BASE_SLOT_NAME);
        self.frame.push_heap_checkpoint(base);
    }

    fn emit(&mut self, instr: &Instr) -> Result<()> {
        match instr {
            Instr::BinOp { op, result, lhs, rhs } => self.emit_binop(*op, result, lhs, rhs),
            Instr::LogNot { result, operand } => self.emit_lognot(result, operand),
            Instr::Assign { ident, value } => self.emit_assign(ident, value),
            Instr::Jump(label) => {
                self.line(format!("jmp {}", asm_label(*label)));
                Ok(())
            }
            Instr::JumpFalse { cond, label } => self.emit_jump_false(cond, *label),
            Instr::Label(label) => {
                self.raw(format!("{}:", asm_label(*label)));
                Ok(())
            }
            Instr::ProgExit(code) => self.emit_prog_exit(code),
            Instr::PrintInt(v) => self.emit_print_int(v),
            Instr::PrintChar(v) => self.emit_print_char(v),
            Instr::ReadChar { result } => self.emit_read_char(result),
            Instr::BgnScope => {
                self.frame.begin_scope();
                Ok(())
            }
            Instr::EndScope => self.emit_end_scope(),
            Instr::ArrayAllocate { ident, size } => self.emit_array_allocate(ident, size),
            Instr::ArrayAssign { array, index, value } => self.emit_array_assign(array, index, value),
            Instr::ArrayGet { result, array, index } => self.emit_array_get(result, array, index),
        }
    }

    /// Loads `operand`'s value into `reg`. A temporary is popped off the
    /// runtime stack (it was pushed by whatever produced it); a name is read
    /// by its frame offset; a constant is materialized directly.
    fn load_into(&mut self, operand: &Operand, reg: &str) -> Result<()> {
        match operand {
            Operand::Const(n) => {
                self.line(format!("mov {reg}, {n}"));
                Ok(())
            }
            Operand::Temp(_) => {
                self.line(format!("pop {reg}"));
                self.frame.pop_temp();
                Ok(())
            }
            Operand::Name(name) => {
                let slot = self
                    .frame
                    .slot_of(name)
                    .ok_or_else(|| GenError::UnknownLocal(name.clone()))?;
                let offset = self.frame.offset_of(slot);
                self.line(format!("mov {reg}, QWORD [rsp + {offset}]"));
                Ok(())
            }
        }
    }

    /// Pushes `reg` as the value of a freshly produced temporary.
    fn push_result(&mut self, reg: &str) {
        self.line(format!("push {reg}"));
        self.frame.push_temp();
    }

    /// Pushes `reg` into a slot that [`Frame::declare`] already reserved —
    /// unlike `push_result`, the depth counter must not move again here.
    fn push_declared(&mut self, reg: &str) {
        self.line(format!("push {reg}"));
    }

    fn emit_binop(&mut self, op: BinOp, result: &Operand, lhs: &Operand, rhs: &Operand) -> Result<()> {
        // `rhs` was lowered before `lhs`, so if both are temporaries, `lhs`'s
        // is the one sitting on top of the stack right now.
        self.load_into(lhs, "rax")?;
        self.load_into(rhs, "rbx")?;

        use BinOp::*;
        match op {
            Add => self.line("add rax, rbx"),
            Subtract => self.line("sub rax, rbx"),
            Multiply => self.line("imul rax, rbx"),
            Divide => {
                self.line("xor rdx, rdx");
                self.line("div rbx");
            }
            Modulo => {
                self.line("xor rdx, rdx");
                self.line("div rbx");
                self.line("mov rax, rdx");
            }
            Equal => self.set_compare("sete"),
            NotEqual => self.set_compare("setne"),
            Greater => self.set_compare("setg"),
            GreaterEqual => self.set_compare("setge"),
            Less => self.set_compare("setl"),
            LessEqual => self.set_compare("setle"),
            LogicalAnd => self.line("and rax, rbx"),
            LogicalOr => self.line("or rax, rbx"),
        }

        let _ = result;
        self.push_result("rax");
        Ok(())
    }

    fn set_compare(&mut self, setcc: &str) {
        self.line("cmp rax, rbx");
        self.line(format!("{setcc} al"));
        self.line("movzx rax, al");
    }

    fn emit_lognot(&mut self, result: &Operand, operand: &Operand) -> Result<()> {
        self.load_into(operand, "rax")?;
        // Bitwise complement of the whole register, not a 0/1 logical flip.
        self.line("not rax");
        let _ = result;
        self.push_result("rax");
        Ok(())
    }

    fn emit_assign(&mut self, ident: &Operand, value: &Operand) -> Result<()> {
        match ident {
            Operand::Temp(_) => {
                self.load_into(value, "rax")?;
                self.push_result("rax");
                Ok(())
            }
            Operand::Name(name) => {
                if let Some(slot) = self.frame.slot_of(name) {
                    self.load_into(value, "rax")?;
                    let offset = self.frame.offset_of(slot);
                    self.line(format!("mov QWORD [rsp + {offset}], rax"));
                } else {
                    self.load_into(value, "rax")?;
                    self.frame.declare(name.clone());
                    self.push_declared("rax");
                }
                Ok(())
            }
            Operand::Const(n) => Err(GenError::InvalidTarget(n.to_string())),
        }
    }

    fn emit_jump_false(&mut self, cond: &Operand, label: LabelId) -> Result<()> {
        self.load_into(cond, "rax")?;
        self.line("test rax, rax");
        self.line(format!("jz {}", asm_label(label)));
        Ok(())
    }

    fn emit_prog_exit(&mut self, code: &Operand) -> Result<()> {
        self.load_into(code, "rdi")?;
        self.line("mov rax, 60");
        self.line("syscall");
        Ok(())
    }

    fn emit_print_int(&mut self, v: &Operand) -> Result<()> {
        // `_print_int` takes its argument in rax, not the usual rdi.
        self.load_into(v, "rax")?;
        self.line("call _print_int");
        Ok(())
    }

    fn emit_print_char(&mut self, v: &Operand) -> Result<()> {
        self.load_into(v, "rax")?;
        self.line("push rax");
        self.line("mov rax, 1");
        self.line("mov rdi, 1");
        self.line("mov rsi, rsp");
        self.line("mov rdx, 1");
        self.line("syscall");
        self.line("add rsp, 8");
        Ok(())
    }

    fn emit_read_char(&mut self, result: &Operand) -> Result<()> {
        // The reserved slot itself is the syscall's read buffer, so this
        // doesn't go through `push_result` — the `sub rsp, 8` below is the
        // temporary's push.
        self.line("sub rsp, 8");
        self.frame.push_temp();
        self.line("mov rax, 0");
        self.line("xor rdi, rdi");
        self.line("mov rsi, rsp");
        self.line("mov rdx, 1");
        self.line("syscall");
        let _ = result;
        Ok(())
    }

    fn emit_end_scope(&mut self) -> Result<()> {
        let (locals_to_pop, new_heap_top) = self.frame.end_scope();

        if let Some(slot) = new_heap_top {
            // Must address the slot before `add rsp` changes every offset
            // underneath it.
            let offset = self.frame.offset_of(slot) + locals_to_pop as u32 * 8;
            self.line(format!("mov rdi, QWORD [rsp + {offset}]"));
            self.line("mov rax, 12");
            self.line("syscall");
        }

        if locals_to_pop > 0 {
            self.line(format!("add rsp, {}", locals_to_pop * 8));
        }
        Ok(())
    }

    fn emit_array_allocate(&mut self, ident: &Operand, size: &Operand) -> Result<()> {
        let name = match ident {
            Operand::Name(name) => name.clone(),
            other => return Err(GenError::InvalidTarget(format!("{other:?}"))),
        };

        let base_slot = self.frame.heap_top_slot();
        let base_offset = self.frame.offset_of(base_slot);
        self.line(format!("mov rbx, QWORD [rsp + {base_offset}]"));
        self.load_into(size, "rax")?;
        self.line("imul rax, 8");
        self.line("add rax, rbx");
        self.line("mov rdi, rax");
        self.line("mov rax, 12");
        self.line("syscall");

        // The array's identifier aliases the existing heap-checkpoint slot
        // rather than getting a push of its own — that slot already holds
        // the pre-grow break pointer, which is exactly the array's base
        // address. Only the new break pointer (rax) is actually pushed.
        self.frame.alias(name, base_slot);

        self.line("push rax");
        let ckpt_slot = self.frame.push_temp();
        self.frame.push_heap_checkpoint(ckpt_slot);
        Ok(())
    }

    fn emit_array_assign(&mut self, array: &Operand, index: &Operand, value: &Operand) -> Result<()> {
        // `value` was lowered after `index`, so it sits on top if both are
        // temporaries.
        self.load_into(value, "rcx")?;
        self.load_into(index, "rbx")?;
        self.load_into(array, "rax")?;
        self.line("shl rbx, 3");
        self.line("add rax, rbx");
        self.line("mov QWORD [rax], rcx");
        Ok(())
    }

    fn emit_array_get(&mut self, result: &Operand, array: &Operand, index: &Operand) -> Result<()> {
        self.load_into(index, "rbx")?;
        self.load_into(array, "rax")?;
        self.line("shl rbx, 3");
        self.line("add rax, rbx");
        self.line("mov rax, QWORD [rax]");
        let _ = result;
        self.push_result("rax");
        Ok(())
    }
}

impl Default for AsmGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn asm_label(label: LabelId) -> String {
    format!(".{label}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppc_ir::Operand;

    fn gen(instrs: &[Instr]) -> String {
        AsmGenerator::new().generate(instrs).unwrap()
    }

    #[test]
    fn prologue_queries_brk_before_any_instruction() {
        let asm = gen(&[Instr::ProgExit(Operand::Const(0))]);
        assert!(asm.contains("mov rax, 12"));
        assert!(asm.contains("_start:"));
    }

    #[test]
    fn prog_exit_loads_code_into_rdi() {
        let asm = gen(&[Instr::ProgExit(Operand::Const(7))]);
        assert!(asm.contains("mov rdi, 7"));
        assert!(asm.contains("mov rax, 60"));
    }

    #[test]
    fn new_name_assign_declares_and_pushes() {
        let asm = gen(&[
            Instr::Assign { ident: Operand::name("x"), value: Operand::Const(5) },
            Instr::ProgExit(Operand::Const(0)),
        ]);
        assert!(asm.contains("mov rax, 5"));
        assert!(asm.contains("push rax"));
    }

    #[test]
    fn reassign_to_existing_name_does_not_grow_stack() {
        let instrs = [
            Instr::Assign { ident: Operand::name("x"), value: Operand::Const(5) },
            Instr::Assign { ident: Operand::name("x"), value: Operand::Const(9) },
            Instr::ProgExit(Operand::Const(0)),
        ];
        let asm = gen(&instrs);
        assert!(asm.contains("mov QWORD [rsp + 0], rax"));
    }

    #[test]
    fn binop_loads_lhs_before_rhs() {
        let instrs = [
            Instr::BinOp {
                op: BinOp::Add,
                result: Operand::Temp(0),
                lhs: Operand::Const(1),
                rhs: Operand::Const(2),
            },
            Instr::ProgExit(Operand::Const(0)),
        ];
        let asm = gen(&instrs);
        let rax_pos = asm.find("mov rax, 1").unwrap();
        let rbx_pos = asm.find("mov rbx, 2").unwrap();
        assert!(rax_pos < rbx_pos);
    }

    #[test]
    fn end_scope_pops_locals_declared_since_begin_scope() {
        let instrs = [
            Instr::BgnScope,
            Instr::Assign { ident: Operand::name("x"), value: Operand::Const(1) },
            Instr::EndScope,
            Instr::ProgExit(Operand::Const(0)),
        ];
        let asm = gen(&instrs);
        assert!(asm.contains("add rsp, 8"));
    }

    #[test]
    fn array_allocate_aliases_the_checkpoint_slot_instead_of_pushing_one() {
        let instrs = [
            Instr::ArrayAllocate { ident: Operand::name("arr"), size: Operand::Const(3) },
            Instr::ProgExit(Operand::Const(0)),
        ];
        let asm = gen(&instrs);
        assert!(asm.contains("imul rax, 8"));
        // Only the new break pointer is pushed; the array's own identifier
        // reuses the slot already holding the pre-grow break.
        assert!(asm.contains("push rax"));
        assert!(!asm.contains("push rbx"));
    }

    #[test]
    fn array_access_reads_the_aliased_base_slot() {
        let instrs = [
            Instr::ArrayAllocate { ident: Operand::name("arr"), size: Operand::Const(3) },
            Instr::ArrayGet {
                result: Operand::Temp(0),
                array: Operand::name("arr"),
                index: Operand::Const(0),
            },
            Instr::ProgExit(Operand::Const(0)),
        ];
        let asm = gen(&instrs);
        // The base load must come from the heap-base slot's offset (the
        // only slot pushed before the array's own allocation), confirming
        // `arr` resolved to an existing slot rather than a fresh one.
        assert!(asm.contains("mov rax, QWORD [rsp + 8]"));
    }
}
