use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::{Function, Type},
    interpreter::value::Value,
};

/// A declared variable: its declared type and current value.
///
/// The declared type is fixed at declaration (or parameter binding) time and
/// every later assignment is checked against it.
#[derive(Debug, Clone)]
pub struct Variable {
    /// The declared type.
    pub ty:    Type,
    /// The current value.
    pub value: Value,
}

/// The interpreter's runtime state.
///
/// Three pieces, deliberately separate:
/// - a flat, global function table, write-once per name and never shadowed
///   by locals (a variable and a function may share a name);
/// - the current local scope chain, one map per lexical block, innermost
///   last;
/// - a stack of stashed caller chains implementing call isolation: entering
///   a function replaces the whole chain with a fresh one holding only the
///   bound parameters, so callee code can never see caller locals.
///
/// The recursion-depth counter lives here too; it counts entered function
/// scopes and is checked against the configured ceiling by the evaluator.
#[derive(Debug, Default)]
pub struct Environment {
    functions:       HashMap<String, Rc<Function>>,
    scopes:          Vec<HashMap<String, Variable>>,
    stashed:         Vec<Vec<HashMap<String, Variable>>>,
    recursion_depth: usize,
}

impl Environment {
    /// Creates an environment with one empty local scope and no functions.
    #[must_use]
    pub fn new() -> Self {
        Self { functions:       HashMap::new(),
               scopes:          vec![HashMap::new()],
               stashed:         Vec::new(),
               recursion_depth: 0, }
    }

    /// Registers a function. The first registration of a name wins; the
    /// parser has already reported duplicates.
    pub fn add_function(&mut self, function: Rc<Function>) {
        self.functions
            .entry(function.name.clone())
            .or_insert(function);
    }

    /// Whether a function with this name is registered.
    #[must_use]
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Looks up a registered function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Rc<Function>> {
        self.functions.get(name)
    }

    /// Opens a child scope on block entry.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Closes the innermost scope on block exit, dropping its variables.
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Enters a function call: stashes the caller's whole chain, starts a
    /// fresh chain holding only the bound parameters and bumps the
    /// recursion depth.
    pub fn enter_function(&mut self, parameters: Vec<(String, Variable)>) {
        let mut scope = HashMap::with_capacity(parameters.len());
        for (name, variable) in parameters {
            scope.insert(name, variable);
        }
        self.stashed
            .push(std::mem::replace(&mut self.scopes, vec![scope]));
        self.recursion_depth += 1;
    }

    /// Leaves a function call: restores the caller's chain and decrements
    /// the recursion depth.
    pub fn exit_function(&mut self) {
        self.scopes = self.stashed
                          .pop()
                          .unwrap_or_else(|| vec![HashMap::new()]);
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    /// The number of function scopes currently entered.
    #[must_use]
    pub const fn recursion_depth(&self) -> usize {
        self.recursion_depth
    }

    /// Whether `name` is declared anywhere in the current chain.
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }

    /// Looks `name` up, walking the chain from the innermost scope out.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Declares a variable in the innermost scope. Redeclaration checks are
    /// the caller's job; the `for` statement uses the overwrite behavior to
    /// rebind its loop variable between iterations.
    pub fn declare(&mut self, name: String, variable: Variable) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, variable);
        }
    }

    /// Stores a new value into the nearest scope declaring `name`. Type
    /// agreement has already been checked by the evaluator; assigning an
    /// undeclared name is a no-op (the evaluator errors before calling
    /// this).
    pub fn assign(&mut self, name: &str, value: Value) {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(variable) = scope.get_mut(name) {
                variable.value = value;
                return;
            }
        }
    }
}
