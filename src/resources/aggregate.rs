//! Grouping of per-identifier trees into per-domain resources.

use std::collections::BTreeMap;

use super::LanguageCache;
use crate::identifier::Identifier;
use crate::input::{
    FlatMap,
    flatten,
};

/// Namespace every component resource is returned under.
pub const COMPONENT_NAMESPACE: &str = "component";

/// Domain → merged flat translations.
pub type Resources = BTreeMap<String, FlatMap>;

/// Build the resources response for `identifiers`.
///
/// Clients cannot tell which platform an entity belongs to, so a component and
/// all of its platforms are served together under their domain. Each
/// identifier's tree is flattened and merged in `identifiers` order; a later
/// identifier replaces an earlier one's value for the same dotted key and
/// leaves every other key alone.
#[must_use]
pub fn build_resources(cache: &LanguageCache, identifiers: &[Identifier]) -> Resources {
    let mut resources = Resources::new();

    for identifier in identifiers {
        let domain = resources.entry(identifier.domain().to_string()).or_default();

        let Some(tree) = cache.get(identifier) else {
            tracing::warn!(%identifier, "Translations not cached, skipping");
            continue;
        };

        domain.extend(flatten(tree));
    }

    resources
}

/// Prefix resources with the `component` namespace and their domain.
///
/// `{"light": {"state.on": "On"}}` becomes `{"component.light.state.on": "On"}`.
#[must_use]
pub fn component_resources(resources: Resources) -> FlatMap {
    resources
        .into_iter()
        .flat_map(|(domain, keys)| {
            keys.into_iter()
                .map(move |(key, value)| (format!("{COMPONENT_NAMESPACE}.{domain}.{key}"), value))
        })
        .collect()
}
