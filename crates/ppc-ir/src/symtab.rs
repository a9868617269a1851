//! The identifier symbol table: a flat type map plus a scope stack that
//! records, for each open scope, which names were introduced in it so they
//! can be dropped again on scope exit.

use ppc_par::ast::VarType;
use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Scalar(VarType),
    Array(VarType),
}

impl Binding {
    pub fn var_type(self) -> VarType {
        match self {
            Binding::Scalar(t) | Binding::Array(t) => t,
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, Binding::Array(_))
    }
}

#[derive(Default)]
pub struct SymbolTable {
    bindings: FxHashMap<String, Binding>,
    scopes: Vec<Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            bindings: FxHashMap::default(),
            scopes: vec![Vec::new()],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Binding> {
        self.bindings.get(name).copied()
    }

    /// Declares `name` in the current (innermost) scope. Returns `false` if
    /// `name` already has a binding anywhere in the currently-visible chain —
    /// the caller turns that into a `DuplicateDeclaration` error.
    pub fn declare(&mut self, name: &str, binding: Binding) -> bool {
        if self.bindings.contains_key(name) {
            return false;
        }
        self.bindings.insert(name.to_string(), binding);
        self.scopes
            .last_mut()
            .expect("symbol table always has a root scope")
            .push(name.to_string());
        true
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Vec::new());
    }

    /// Exits the current scope, dropping every binding introduced inside it
    /// so a later scope may reuse the same spelling (shadowing across
    /// sibling/outer scopes, not within one).
    pub fn exit_scope(&mut self) {
        let introduced = self
            .scopes
            .pop()
            .expect("exit_scope without a matching enter_scope");
        for name in introduced {
            self.bindings.remove(&name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redeclaration_in_same_scope_fails() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", Binding::Scalar(VarType::Int)));
        assert!(!table.declare("x", Binding::Scalar(VarType::Bool)));
    }

    #[test]
    fn name_is_reusable_after_scope_exit() {
        let mut table = SymbolTable::new();
        table.enter_scope();
        assert!(table.declare("x", Binding::Scalar(VarType::Int)));
        table.exit_scope();
        assert!(table.lookup("x").is_none());
        assert!(table.declare("x", Binding::Scalar(VarType::Bool)));
    }

    #[test]
    fn shadowing_inner_scope_is_rejected_while_open() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", Binding::Scalar(VarType::Int)));
        table.enter_scope();
        assert!(!table.declare("x", Binding::Scalar(VarType::Int)));
    }
}
