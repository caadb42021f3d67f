//! Core Router implementation

use crate::classifier::IntentClassifier;
use crate::config::RouterConfig;
use crate::fallback::FallbackExtractor;
use crate::normalize::normalize;
use crate::patterns::PatternSet;
use crate::types::{IdentifierResolution, RouteOutcome, RouteStage};
use concierge_domain::traits::ModelGateway;
use concierge_domain::{Identifier, Query, RoutingDecision};
use std::fmt::Display;
use std::sync::Arc;
use std::thread;
use tracing::{debug, info};

/// Routes one query at a time to an intent and resolves its identifier
///
/// Both decisions are total: `route` always returns an outcome, whatever the
/// model gateway does. The router holds no per-turn state; conversation
/// context arrives through [`Query::known_identifier`].
pub struct Router<G> {
    gateway: Arc<G>,
    classifier: IntentClassifier<Arc<G>>,
    fallback: FallbackExtractor<Arc<G>>,
    patterns: PatternSet,
    config: RouterConfig,
}

impl<G> Router<G>
where
    G: ModelGateway + Send + Sync,
    G::Error: Display,
{
    /// Create a router using the standard patterns and templates
    pub fn new(gateway: G, config: RouterConfig) -> Self {
        let gateway = Arc::new(gateway);
        Self {
            classifier: IntentClassifier::new(Arc::clone(&gateway)),
            fallback: FallbackExtractor::new(Arc::clone(&gateway)),
            gateway,
            patterns: PatternSet::standard(),
            config,
        }
    }

    /// Replace the identifier pattern set
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Name of the backing model
    pub fn model_name(&self) -> &str {
        self.gateway.model_name()
    }

    /// Classify raw query text; never fails
    pub fn classify(&self, text: &str) -> RoutingDecision {
        self.classifier.classify(text)
    }

    /// Resolve the identifier for a query; never fails
    ///
    /// Order: structural patterns on the normalized text, then the fallback
    /// extractor (exactly once, only when no pattern matched), then the
    /// query's known identifier.
    pub fn resolve_identifier(&self, query: &Query) -> IdentifierResolution {
        let normalized_text = normalize(query.text());
        debug!("Query {} stage {}", query.id(), RouteStage::Normalized);

        let matched = self.patterns.extract(&normalized_text);
        let pattern_matched = matched.is_some();

        let mut fallback_invoked = false;
        let identifier = match matched {
            Some(identifier) => {
                debug!(
                    "Query {} stage {}: {} via {}",
                    query.id(),
                    RouteStage::Matched,
                    identifier,
                    identifier.source
                );
                Some(identifier)
            }
            None => {
                debug!("Query {} stage {}", query.id(), RouteStage::Unmatched);
                if self.config.fallback_enabled {
                    fallback_invoked = true;
                    self.fallback.extract(&normalized_text)
                } else {
                    None
                }
            }
        };

        let identifier = identifier.or_else(|| {
            if !self.config.carry_context_identifier {
                return None;
            }
            query.known_identifier().map(|known| {
                debug!("Query {} reusing context identifier {}", query.id(), known);
                Identifier::from_context(known)
            })
        });

        debug!(
            "Query {} stage {}: {}",
            query.id(),
            RouteStage::IdentifierResolved,
            identifier.as_ref().map_or("none", Identifier::as_str)
        );

        IdentifierResolution {
            identifier,
            normalized_text,
            pattern_matched,
            fallback_invoked,
        }
    }

    /// Route a query: classify it and resolve its identifier
    pub fn route(&self, query: &Query) -> RouteOutcome {
        debug!("Query {} stage {}", query.id(), RouteStage::Start);

        let (decision, resolution) = if self.config.parallel {
            self.route_parallel(query)
        } else {
            let resolution = self.resolve_identifier(query);
            (self.classify(query.text()), resolution)
        };

        debug!(
            "Query {} stage {}: {}",
            query.id(),
            RouteStage::Classified,
            decision.intent
        );
        info!(
            "Routed query {} to {} (identifier: {}, fallback: {})",
            query.id(),
            decision.intent,
            resolution
                .identifier
                .as_ref()
                .map_or("none", Identifier::as_str),
            resolution.fallback_invoked
        );

        let mut stages = vec![RouteStage::Start];
        stages.extend(resolution.stages());
        stages.push(RouteStage::Classified);

        RouteOutcome {
            query_id: query.id(),
            decision,
            identifier: resolution.identifier,
            fallback_invoked: resolution.fallback_invoked,
            stages,
        }
    }

    fn route_parallel(&self, query: &Query) -> (RoutingDecision, IdentifierResolution) {
        thread::scope(|scope| {
            let classification = scope.spawn(|| self.classify(query.text()));
            let resolution = self.resolve_identifier(query);
            let decision = classification
                .join()
                .unwrap_or_else(|_| RoutingDecision::failed("classification thread panicked"));
            (decision, resolution)
        })
    }
}
