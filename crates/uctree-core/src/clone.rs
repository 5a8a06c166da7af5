use std::{
    any::{TypeId, type_name},
    collections::HashSet,
    sync::Arc,
};

/// Controls which types are shared rather than duplicated when a node deep-clones its state.
///
/// Domains that embed immutable singletons (player identities, lookup tables) behind an
/// `Arc` call [`CloneContext::share_or_clone`] from their `deep_clone`, and the engine
/// decides per type whether the `Arc` is reused or backed by a fresh copy.
#[derive(Debug, Clone, Default)]
pub struct CloneContext {
    shared: HashSet<TypeId>,
    shared_names: Vec<&'static str>,
}

impl CloneContext {
    pub fn new() -> Self {
        CloneContext::default()
    }

    /// Mark `T` as shared: deep clones keep pointing at the same value.
    pub fn dont_clone<T: 'static>(&mut self) -> &mut Self {
        if self.shared.insert(TypeId::of::<T>()) {
            self.shared_names.push(type_name::<T>());
        }
        self
    }

    /// Return whether `T` has been marked as shared.
    pub fn is_shared<T: 'static>(&self) -> bool {
        self.shared.contains(&TypeId::of::<T>())
    }

    /// Type names registered as shared, in registration order.
    pub fn shared_type_names(&self) -> &[&'static str] {
        &self.shared_names
    }

    /// Reuse `value` when `T` is shared, otherwise allocate an independent copy.
    pub fn share_or_clone<T: Clone + 'static>(&self, value: &Arc<T>) -> Arc<T> {
        if self.is_shared::<T>() {
            Arc::clone(value)
        } else {
            Arc::new(T::clone(value))
        }
    }
}
