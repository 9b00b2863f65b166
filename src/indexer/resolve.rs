//! Manifest resolution - joining the intermediate maps into links.
//!
//! After the streaming pass ends, every recorded component target is joined
//! against the package-name and manifest maps to produce the final
//! identifier-to-manifest associations, with optional heuristic fallbacks
//! and sub-component propagation.

use crate::core::ComponentIdentifier;
use crate::index::LinkTable;
use crate::indexer::BuildGraphIndexer;
use crate::util::config::IndexConfig;

/// Component-name suffixes stripped to form heuristic alias identifiers.
/// Checked longest-first so the longer suffix wins when both apply.
const ALIAS_SUFFIXES: [&str; 2] = ["_component_generated_manifest", "_component"];

/// Join the indexer's maps into the forward/reverse link table.
///
/// Components with no named package or no known manifest are skipped
/// silently; an incomplete index is still useful.
pub fn resolve_links(graph: &BuildGraphIndexer, config: &IndexConfig) -> LinkTable {
    let normalize = config.normalize_word_separators;
    let mut links = LinkTable::new();

    for (component_target, package_targets) in graph.packages_by_component() {
        let named_packages: Vec<&str> = package_targets
            .iter()
            .filter_map(|target| graph.package_name(target))
            .collect();
        if named_packages.is_empty() {
            tracing::trace!("{} is not part of any named package", component_target);
            continue;
        }

        // Heuristic retries rewrite the working key; sub-component lookup
        // below intentionally uses the rewritten key.
        let mut working_key = component_target.clone();
        let mut manifest = graph.manifest_for(&working_key);

        if manifest.is_none() && config.use_heuristics_to_find_more_links {
            if let Some(collapsed) = working_key.collapse_test_prefix() {
                working_key = collapsed;
                manifest = graph.manifest_for(&working_key);
            }
            if manifest.is_none() {
                if let Some(stripped) = working_key.strip_component_suffix() {
                    working_key = stripped;
                    manifest = graph.manifest_for(&working_key);
                }
            }
        }

        let Some(manifest) = manifest else {
            tracing::trace!("no manifest known for {}", component_target);
            continue;
        };

        for package_name in named_packages {
            let identifier =
                ComponentIdentifier::new(package_name, &manifest.component_name);
            links.register(&identifier, manifest.manifest_path.clone(), normalize);

            // Constituent sub-components share the component's manifest.
            for sub_target in graph.sub_components(&working_key) {
                let sub_identifier =
                    ComponentIdentifier::new(package_name, sub_target.target_name());
                links.register(&sub_identifier, manifest.manifest_path.clone(), normalize);
            }

            if config.use_heuristics_to_find_more_links {
                if let Some(alias) = strip_alias_suffix(&manifest.component_name) {
                    let alias_identifier = ComponentIdentifier::new(package_name, alias);
                    links.register(&alias_identifier, manifest.manifest_path.clone(), normalize);
                }
            }
        }
    }

    links
}

fn strip_alias_suffix(component_name: &str) -> Option<&str> {
    ALIAS_SUFFIXES
        .iter()
        .find_map(|suffix| component_name.strip_suffix(suffix))
        .filter(|stripped| !stripped.is_empty())
}
