use std::collections::HashMap;

use log::debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScopeError {
    #[error("variable {name:?} already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("variable {name:?} is not declared")]
    Undeclared { name: String },
}

/// Stack of name-to-binding maps. Index 0 is the global scope and is
/// never popped.
///
/// `B` is whatever a binding carries: the checker stores a `Type`, the
/// interpreter stores the declared type together with the current value.
#[derive(Debug)]
pub struct ScopeStack<B> {
    scopes: Vec<HashMap<String, B>>,
}

impl<B> ScopeStack<B> {
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
        debug!("push scope, depth {}", self.scopes.len());
    }

    /// Drops the innermost scope and every binding in it.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            debug!("pop scope, depth {}", self.scopes.len());
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Binds `name` in the innermost scope.
    ///
    /// Shadowing a binding from an enclosing scope is fine; a second
    /// declaration in the same scope is not.
    pub fn declare(&mut self, name: &str, binding: B) -> Result<(), ScopeError> {
        let Some(scope) = self.scopes.last_mut() else {
            return Err(ScopeError::Undeclared { name: name.to_string() });
        };

        if scope.contains_key(name) {
            return Err(ScopeError::DuplicateDeclaration { name: name.to_string() });
        }

        scope.insert(name.to_string(), binding);
        Ok(())
    }

    /// Nearest binding of `name`, searching from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<&B> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut B> {
        self.scopes.iter_mut().rev().find_map(|scope| scope.get_mut(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Overwrites the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, binding: B) -> Result<(), ScopeError> {
        match self.lookup_mut(name) {
            Some(slot) => {
                *slot = binding;
                Ok(())
            }
            None => Err(ScopeError::Undeclared { name: name.to_string() }),
        }
    }
}

impl<B> Default for ScopeStack<B> {
    fn default() -> Self {
        Self::new()
    }
}
