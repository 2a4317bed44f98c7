//! The symbol table: a stack of scopes.
//!
//! Only two kinds of scopes exist: the program-level scope and one scope
//! per active `loop` body. Lookup walks from innermost to outermost;
//! insertion always targets the current (innermost) scope.

use psc_util::Span;
use rustc_hash::FxHashMap;

use crate::types::Type;

/// A saved copy of one scope's bindings. Used to check the branches of
/// `check`/`choose` in isolation before merging their definite
/// assignments back into the enclosing scope.
pub type ScopeBindings = FxHashMap<String, Binding>;

/// What the symbol table records about a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    /// The variable's type, fixed at first assignment.
    pub ty: Type,
    /// Where the name was first bound.
    pub defined_at: Span,
    /// Whether this binding is a loop variable (not assignable in its
    /// body).
    pub is_loop_var: bool,
}

/// A stack of name-to-binding maps.
pub struct ScopeStack {
    scopes: Vec<FxHashMap<String, Binding>>,
}

impl ScopeStack {
    /// Create a stack holding only the program-level scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Enter a new innermost scope (a loop body).
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Leave the innermost scope. The program-level scope is never popped.
    pub fn pop(&mut self) {
        debug_assert!(self.scopes.len() > 1, "cannot pop the program scope");
        self.scopes.pop();
    }

    /// Number of active scopes (at least 1).
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Bind a name in the current scope, shadowing any outer binding of
    /// the same spelling.
    pub fn insert(&mut self, name: String, binding: Binding) {
        self.scopes
            .last_mut()
            .expect("the program scope always exists")
            .insert(name, binding);
    }

    /// Resolve a name, searching innermost to outermost.
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Clone the current scope's bindings.
    pub fn save_current(&self) -> ScopeBindings {
        self.scopes
            .last()
            .expect("the program scope always exists")
            .clone()
    }

    /// Replace the current scope's bindings with a saved copy.
    pub fn restore_current(&mut self, bindings: ScopeBindings) {
        *self
            .scopes
            .last_mut()
            .expect("the program scope always exists") = bindings;
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_binding() -> Binding {
        Binding {
            ty: Type::Int,
            defined_at: Span::DUMMY,
            is_loop_var: false,
        }
    }

    #[test]
    fn test_program_scope_lookup() {
        let mut scopes = ScopeStack::new();
        scopes.insert("x".to_string(), int_binding());
        assert_eq!(scopes.lookup("x").map(|b| b.ty), Some(Type::Int));
        assert!(scopes.lookup("y").is_none());
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut scopes = ScopeStack::new();
        scopes.insert(
            "i".to_string(),
            Binding {
                ty: Type::Str,
                defined_at: Span::DUMMY,
                is_loop_var: false,
            },
        );

        scopes.push();
        scopes.insert(
            "i".to_string(),
            Binding {
                ty: Type::Int,
                defined_at: Span::DUMMY,
                is_loop_var: true,
            },
        );
        assert_eq!(scopes.lookup("i").map(|b| b.ty), Some(Type::Int));
        assert!(scopes.lookup("i").unwrap().is_loop_var);

        scopes.pop();
        // The outer binding is visible again, unchanged.
        assert_eq!(scopes.lookup("i").map(|b| b.ty), Some(Type::Str));
        assert!(!scopes.lookup("i").unwrap().is_loop_var);
    }

    #[test]
    fn test_outer_names_visible_from_inner_scope() {
        let mut scopes = ScopeStack::new();
        scopes.insert("total".to_string(), int_binding());
        scopes.push();
        assert!(scopes.lookup("total").is_some());
        scopes.pop();
    }

    #[test]
    fn test_inner_bindings_vanish_on_pop() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.insert("i".to_string(), int_binding());
        scopes.pop();
        assert!(scopes.lookup("i").is_none());
    }

    #[test]
    fn test_depth() {
        let mut scopes = ScopeStack::new();
        assert_eq!(scopes.depth(), 1);
        scopes.push();
        assert_eq!(scopes.depth(), 2);
        scopes.pop();
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn test_save_and_restore_current() {
        let mut scopes = ScopeStack::new();
        scopes.insert("x".to_string(), int_binding());

        let saved = scopes.save_current();
        scopes.insert("y".to_string(), int_binding());
        assert!(scopes.lookup("y").is_some());

        scopes.restore_current(saved);
        assert!(scopes.lookup("x").is_some());
        assert!(scopes.lookup("y").is_none());
    }

    #[test]
    fn test_restore_only_touches_current_scope() {
        let mut scopes = ScopeStack::new();
        scopes.insert("outer".to_string(), int_binding());

        scopes.push();
        let saved = scopes.save_current();
        scopes.insert("inner".to_string(), int_binding());
        scopes.restore_current(saved);

        assert!(scopes.lookup("inner").is_none());
        assert!(scopes.lookup("outer").is_some());
        scopes.pop();
    }
}
