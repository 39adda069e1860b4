//! In-memory declaration provider for tests and build-time hosts.

use stencil_core::ProviderError;

use super::types::Declaration;
use super::DeclarationProvider;

/// Provider backed by a plain vector of declarations.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    declarations: Vec<Declaration>,
}

impl InMemoryProvider {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Replace a declaration by qualified name, simulating an edit.
    /// Returns false when no declaration with that name exists.
    pub fn replace(&mut self, declaration: Declaration) -> bool {
        match self.declarations.iter_mut().find(|d| d.id == declaration.id) {
            Some(slot) => {
                *slot = declaration;
                true
            }
            None => false,
        }
    }

    /// Remove a declaration by qualified name.
    pub fn remove(&mut self, name: &stencil_core::QualifiedName) -> bool {
        let before = self.declarations.len();
        self.declarations.retain(|d| &d.id != name);
        self.declarations.len() != before
    }
}

impl DeclarationProvider for InMemoryProvider {
    fn declarations(&self) -> Result<Vec<Declaration>, ProviderError> {
        Ok(self.declarations.clone())
    }
}
