use std::collections::HashMap;

use crate::ast::types::Type;

/// Arity recorded for plain variables.
pub const VARIABLE_ARITY: i32 = -1;

/// A resolved declaration.
///
/// `signature[0]` is the variable's type or the function's return type, the
/// rest are parameter types. `arity` is [`VARIABLE_ARITY`] for variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub signature: Vec<Type>,
    pub arity: i32,
}

impl Symbol {
    pub fn variable(name: &str, ty: Type) -> Self {
        Symbol {
            name: name.to_string(),
            signature: vec![ty],
            arity: VARIABLE_ARITY,
        }
    }

    pub fn function(name: &str, return_type: Type, parameters: &[Type]) -> Self {
        let mut signature = vec![return_type];
        signature.extend_from_slice(parameters);

        Symbol {
            name: name.to_string(),
            signature,
            arity: parameters.len() as i32,
        }
    }

    pub fn get_type(&self) -> Type {
        self.signature[0]
    }

    pub fn parameters(&self) -> &[Type] {
        &self.signature[1..]
    }

    pub fn is_function(&self) -> bool {
        self.arity >= 0
    }
}

/// Scope-stacked name resolution with shadowing.
///
/// Every name maps to a stack of bindings, the last one being visible. Each
/// scope remembers the names added directly in it so that closing it pops
/// exactly those bindings again.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Vec<Symbol>>,
    scopes: Vec<Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
            scopes: vec![],
        }
    }

    pub fn begin_scope(&mut self) {
        self.scopes.push(vec![]);
    }

    pub fn end_scope(&mut self) {
        let Some(names) = self.scopes.pop() else {
            return;
        };

        for name in names.iter().rev() {
            if let Some(bindings) = self.symbols.get_mut(name) {
                bindings.pop();
                if bindings.is_empty() {
                    self.symbols.remove(name);
                }
            }
        }
    }

    /// Binds `symbol` in the innermost scope, opening one if none is active.
    pub fn add(&mut self, symbol: Symbol) {
        if self.scopes.is_empty() {
            self.begin_scope();
        }

        if let Some(scope) = self.scopes.last_mut() {
            scope.push(symbol.name.clone());
        }
        self.symbols
            .entry(symbol.name.clone())
            .or_default()
            .push(symbol);
    }

    pub fn declared_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|scope| scope.iter().any(|declared| declared == name))
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// The most recent binding of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name).and_then(|bindings| bindings.last())
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
