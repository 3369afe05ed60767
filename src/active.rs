//! The set of identifiers that currently need translations.

use std::collections::BTreeSet;
use std::sync::{
    PoisonError,
    RwLock,
};

use crate::identifier::Identifier;

/// Supplies the identifiers whose translations must be served.
pub trait ActiveSet: Send + Sync {
    /// Identifiers in the order their translations are merged.
    fn required_identifiers(&self) -> Vec<Identifier>;
}

/// Loaded components plus integrations that are in the middle of being set up.
///
/// The required set is the sorted union of both, so each component is merged
/// before the platforms of its domain.
#[derive(Debug, Default)]
pub struct ActiveComponents {
    /// Units the host has loaded
    loaded: RwLock<BTreeSet<Identifier>>,
    /// Integrations with a setup flow in progress
    flows: RwLock<BTreeSet<Identifier>>,
}

impl ActiveComponents {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set with `identifiers` already loaded.
    #[must_use]
    pub fn with_loaded(identifiers: impl IntoIterator<Item = Identifier>) -> Self {
        let active = Self::new();
        for identifier in identifiers {
            active.mark_loaded(identifier);
        }
        active
    }

    /// Record a component or platform the host has finished loading.
    pub fn mark_loaded(&self, identifier: Identifier) {
        tracing::debug!(%identifier, "Component loaded");
        self.loaded.write().unwrap_or_else(PoisonError::into_inner).insert(identifier);
    }

    /// Record an integration whose setup flow has started.
    pub fn begin_flow(&self, identifier: Identifier) {
        tracing::debug!(%identifier, "Setup flow started");
        self.flows.write().unwrap_or_else(PoisonError::into_inner).insert(identifier);
    }

    /// Forget a setup flow. Returns whether it was in progress.
    pub fn finish_flow(&self, identifier: &Identifier) -> bool {
        self.flows.write().unwrap_or_else(PoisonError::into_inner).remove(identifier)
    }
}

impl ActiveSet for ActiveComponents {
    fn required_identifiers(&self) -> Vec<Identifier> {
        let loaded = self.loaded.read().unwrap_or_else(PoisonError::into_inner);
        let flows = self.flows.read().unwrap_or_else(PoisonError::into_inner);
        loaded.union(&flows).cloned().collect()
    }
}

impl ActiveSet for Vec<Identifier> {
    fn required_identifiers(&self) -> Vec<Identifier> {
        self.clone()
    }
}
