//! Pipeline driver — orchestrates scan → resolve → join → validate → emit
//! with incremental recomputation.
//!
//! Per pass: resolution is memoized per declaration by content hash and runs
//! in parallel over independent declarations; the join is memoized per
//! variant by a signature over both complete sets; emission is memoized per
//! root by its full input key. Validation is a cheap pure function over
//! already-cached inputs and recomputes every pass.
//!
//! Results are committed all-or-nothing: the cache is swapped only after a
//! pass completes, so a discarded in-flight pass can never leak partial
//! state into the next one. Output is merged deterministically — emissions
//! sorted by hint name, diagnostics order-normalized — regardless of
//! discovery or thread scheduling order.

pub mod cache;
pub mod stats;

pub use cache::{CachedEmission, CachedJoin, CachedResolution, IncrementalCache};
pub use stats::PipelineStats;

use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use stencil_core::types::collections::{FxHashMap, FxHashSet};
use stencil_core::types::{KeyWriter, QualifiedName};
use stencil_core::{codes, Diagnostic, PipelineError};

use crate::crossref::{self, JoinOutcome};
use crate::emit::{self, EmissionUnit};
use crate::provider::{Declaration, DeclarationProvider};
use crate::resolver::{RecordRole, ResolvedMetadata};
use crate::scanner::{self, RawDeclaration};
use crate::validate::{self, RootPlan, ValidateContext};
use crate::variants::{PatternVariant, VariantRegistry};

/// Complete result of one pipeline pass.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Artifacts sorted by hint name.
    pub emissions: Vec<EmissionUnit>,
    /// Diagnostics in normalized order.
    pub diagnostics: Vec<Diagnostic>,
    pub stats: PipelineStats,
}

/// Orchestrates the five stages over a registry of variants.
///
/// The cache is an owned field — never ambient global state — so two
/// drivers never observe each other.
pub struct PipelineDriver {
    registry: VariantRegistry,
    cache: IncrementalCache,
}

impl PipelineDriver {
    pub fn new(registry: VariantRegistry) -> Self {
        Self {
            registry,
            cache: IncrementalCache::default(),
        }
    }

    /// Driver over the four built-in variants.
    pub fn with_defaults() -> Self {
        Self::new(VariantRegistry::with_defaults())
    }

    pub fn cache(&self) -> &IncrementalCache {
        &self.cache
    }

    /// Run one full pass over the provider's declaration set.
    pub fn run(&mut self, provider: &dyn DeclarationProvider) -> Result<PipelineOutput, PipelineError> {
        let start = Instant::now();
        let declarations = provider.declarations()?;
        let scan = scanner::scan(&declarations);
        debug!(%scan.stats, "scan complete");

        let namespace_types = namespace_type_table(&declarations);

        let mut next_cache = IncrementalCache::default();
        let mut stats = PipelineStats {
            declarations_total: scan.stats.total,
            declarations_attributed: scan.stats.attributed,
            ..PipelineStats::default()
        };
        let mut emissions: Vec<EmissionUnit> = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        let candidates: Vec<&RawDeclaration<'_>> = scan
            .type_like
            .iter()
            .chain(scan.method_like.iter())
            .collect();

        for variant in self.registry.variants() {
            let variant_diagnostics = self.run_variant(
                variant.as_ref(),
                &candidates,
                &namespace_types,
                &mut next_cache,
                &mut stats,
                &mut emissions,
            );
            diagnostics.extend(variant_diagnostics);
        }

        // Deterministic merge: keyed and sorted, never append-in-discovery
        // order.
        emissions.sort_by(|a, b| a.hint_name.cmp(&b.hint_name));
        diagnostics.sort_by_key(|d| d.sort_key());

        stats.artifacts_emitted = emissions.len();
        stats.duration_us = start.elapsed().as_micros() as u64;

        // All-or-nothing commit: nothing above mutated `self.cache`.
        self.cache = next_cache;

        info!(%stats, "pipeline pass complete");
        Ok(PipelineOutput {
            emissions,
            diagnostics,
            stats,
        })
    }

    /// Run one variant end to end, appending emissions and returning its
    /// diagnostics.
    fn run_variant(
        &self,
        variant: &dyn PatternVariant,
        candidates: &[&RawDeclaration<'_>],
        namespace_types: &FxHashMap<Option<String>, FxHashSet<String>>,
        next_cache: &mut IncrementalCache,
        stats: &mut PipelineStats,
        emissions: &mut Vec<EmissionUnit>,
    ) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();

        // ---- Resolve (parallel, memoized by content hash) ----
        let classified: Vec<(&RawDeclaration<'_>, RecordRole)> = candidates
            .iter()
            .filter_map(|raw| variant.classify(raw.decl).map(|role| (*raw, role)))
            .collect();

        let resolved: Vec<(QualifiedName, bool, CachedResolution)> = classified
            .par_iter()
            .map(|(raw, role)| {
                if let Some(cached) = self.cache.resolution(variant.id(), &raw.decl.id) {
                    if cached.content_hash == raw.content_hash {
                        return (raw.decl.id.clone(), true, cached.clone());
                    }
                }
                let resolution = variant.resolve(raw.decl, *role);
                let entry = CachedResolution {
                    content_hash: raw.content_hash,
                    meta: resolution.meta,
                    diagnostics: resolution.diagnostics,
                };
                (raw.decl.id.clone(), false, entry)
            })
            .collect();

        let mut anchors: Vec<Arc<ResolvedMetadata>> = Vec::new();
        let mut satellites: Vec<Arc<ResolvedMetadata>> = Vec::new();
        for (id, reused, entry) in resolved {
            if reused {
                stats.resolutions_reused += 1;
            } else {
                stats.resolutions_computed += 1;
            }
            diagnostics.extend(entry.diagnostics.iter().cloned());
            if let Some(meta) = &entry.meta {
                match meta.role {
                    RecordRole::Anchor => anchors.push(Arc::clone(meta)),
                    RecordRole::Satellite => satellites.push(Arc::clone(meta)),
                }
            }
            next_cache.insert_resolution(variant.id(), id, entry);
        }

        // ---- Join (barrier; memoized by both-sides signature) ----
        let signature = join_signature(&anchors, &satellites);
        let join = match self.cache.join(variant.id()) {
            Some(cached) if cached.signature == signature => {
                stats.joins_reused += 1;
                cached.clone()
            }
            _ => {
                stats.joins_computed += 1;
                let JoinOutcome {
                    table,
                    diagnostics: join_diagnostics,
                } = crossref::join(&anchors, &satellites, variant.join_rule());
                CachedJoin {
                    signature,
                    table,
                    diagnostics: join_diagnostics,
                }
            }
        };
        diagnostics.extend(join.diagnostics.iter().cloned());
        next_cache.insert_join(variant.id(), join.clone());

        // ---- Validate (pure, recomputed every pass) ----
        let satellites_by_id: FxHashMap<QualifiedName, Arc<ResolvedMetadata>> = satellites
            .iter()
            .map(|s| (s.identity.clone(), Arc::clone(s)))
            .collect();
        let ctx = ValidateContext {
            namespace_types,
            crossref: &join.table,
            satellites: &satellites_by_id,
        };
        for anchor in &anchors {
            diagnostics.extend(variant.validate(anchor, &ctx));
        }

        // ---- Emit (memoized per root by full input key) ----
        anchors.sort_by(|a, b| a.identity.cmp(&b.identity));
        for anchor in &anchors {
            let plan = validate::build_plan(&anchor.identity, &diagnostics);
            if plan.blocked {
                stats.roots_blocked += 1;
                continue;
            }

            let correlated: Vec<&ResolvedMetadata> = join
                .table
                .satellites_of(&anchor.identity)
                .iter()
                .filter_map(|id| satellites_by_id.get(id).map(|arc| arc.as_ref()))
                .collect();
            let inputs_key = emission_key(variant.id(), anchor, &correlated, &plan);

            let entry = match self.cache.emission(variant.id(), &anchor.identity) {
                Some(cached) if cached.inputs_key == inputs_key => {
                    stats.emissions_reused += 1;
                    Some(cached.clone())
                }
                _ => {
                    stats.emissions_computed += 1;
                    match variant.renderer().render(anchor, &correlated, &plan) {
                        Ok(artifact) => Some(CachedEmission {
                            inputs_key,
                            unit: artifact.as_ref().map(emit::compose),
                        }),
                        Err(error) => {
                            diagnostics.push(Diagnostic::error(
                                codes::GEN003,
                                anchor.identity.clone(),
                                anchor.location.clone(),
                                format!("renderer failed for '{}': {}", anchor.identity, error),
                            ));
                            // Failed renders are never cached: the next pass
                            // must retry and resurface the diagnostic.
                            None
                        }
                    }
                }
            };

            if let Some(entry) = entry {
                if let Some(unit) = &entry.unit {
                    emissions.push(unit.clone());
                }
                next_cache.insert_emission(variant.id(), anchor.identity.clone(), entry);
            }
        }

        diagnostics
    }
}

/// Every declared type name per namespace, for collision checks.
fn namespace_type_table(
    declarations: &[Declaration],
) -> FxHashMap<Option<String>, FxHashSet<String>> {
    let mut table: FxHashMap<Option<String>, FxHashSet<String>> = FxHashMap::default();
    for decl in declarations {
        if decl.kind.is_type_like() {
            table
                .entry(decl.id.namespace.clone())
                .or_default()
                .insert(decl.id.name.clone());
        }
    }
    table
}

/// Signature over both complete join inputs. Sorted by identity so the
/// result is independent of resolution order.
fn join_signature(anchors: &[Arc<ResolvedMetadata>], satellites: &[Arc<ResolvedMetadata>]) -> u64 {
    let mut keys: Vec<(&QualifiedName, u64)> = anchors
        .iter()
        .map(|a| (&a.identity, a.decision_key.0))
        .collect();
    keys.sort();
    let mut satellite_keys: Vec<(&QualifiedName, u64)> = satellites
        .iter()
        .map(|s| (&s.identity, s.decision_key.0))
        .collect();
    satellite_keys.sort();

    let mut writer = KeyWriter::new();
    writer.tag("anchors").u64_field(keys.len() as u64);
    for (_, key) in &keys {
        writer.u64_field(*key);
    }
    writer.tag("satellites").u64_field(satellite_keys.len() as u64);
    for (_, key) in &satellite_keys {
        writer.u64_field(*key);
    }
    writer.finish().0
}

/// Emission input key: the root's decision key, its correlated satellites'
/// keys in rendering order, and the emit plan.
fn emission_key(
    variant: &'static str,
    root: &ResolvedMetadata,
    satellites: &[&ResolvedMetadata],
    plan: &RootPlan,
) -> u64 {
    let mut writer = KeyWriter::new();
    writer.str_field(variant).u64_field(root.decision_key.0);
    writer.u64_field(satellites.len() as u64);
    for satellite in satellites {
        writer.u64_field(satellite.decision_key.0);
    }
    writer.u64_field(plan.skipped_members.len() as u64);
    for member in &plan.skipped_members {
        writer.str_field(member);
    }
    writer.finish().0
}
