//! Variant registry.

use super::traits::PatternVariant;
use super::{BuilderVariant, DecoratorVariant, MediatorVariant, SingletonVariant};

/// Ordered set of registered variants.
///
/// Registration order is not semantically meaningful — driver output is
/// keyed and sorted — but it is kept stable anyway so logs read the same
/// from run to run.
pub struct VariantRegistry {
    variants: Vec<Box<dyn PatternVariant>>,
}

impl VariantRegistry {
    /// Registry with the four built-in variants.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(BuilderVariant));
        registry.register(Box::new(DecoratorVariant));
        registry.register(Box::new(MediatorVariant));
        registry.register(Box::new(SingletonVariant));
        registry
    }

    pub fn empty() -> Self {
        Self {
            variants: Vec::new(),
        }
    }

    pub fn register(&mut self, variant: Box<dyn PatternVariant>) {
        self.variants.push(variant);
    }

    pub fn variants(&self) -> &[Box<dyn PatternVariant>] {
        &self.variants
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
