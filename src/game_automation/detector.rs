//! Detection aggregation: one matching task per template, merged per class

use super::types::DetectionSet;
use crate::desktop::error::{AutomationError, AutomationResult};
use crate::template_matching::{Position, TemplateClass, TemplateSet, find_matches};
use image::GrayImage;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinSet;

/// Number of templates matched in parallel
pub const MATCH_WORKERS: usize = 4;

/// Runs the template matcher for every template against a frame on a bounded pool
pub struct DetectionAggregator {
    runtime: Runtime,
    threshold: f32,
}

impl DetectionAggregator {
    pub fn new(threshold: f32) -> AutomationResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(MATCH_WORKERS)
            .thread_name("template-match")
            .build()?;
        Ok(Self { runtime, threshold })
    }

    /// Match all templates against `frame` and wait for every task to finish
    ///
    /// Results arrive in completion order; the set is keyed by class so the merge
    /// does not depend on it.
    pub fn detect_all(
        &self,
        frame: Arc<GrayImage>,
        templates: &TemplateSet,
    ) -> AutomationResult<DetectionSet> {
        let start = Instant::now();
        let threshold = self.threshold;

        let results: Vec<(TemplateClass, Vec<Position>)> = self.runtime.block_on(async {
            let mut tasks = JoinSet::new();
            for template in templates.iter() {
                let frame = Arc::clone(&frame);
                let template = Arc::clone(template);
                tasks.spawn_blocking(move || {
                    let hits = find_matches(&frame, &template.image, threshold);
                    (template.class, hits)
                });
            }

            let mut results = Vec::with_capacity(MATCH_WORKERS);
            while let Some(joined) = tasks.join_next().await {
                results.push(joined?);
            }
            Ok::<_, AutomationError>(results)
        })?;

        let mut detections = DetectionSet::new();
        for (class, hits) in results {
            if !hits.is_empty() {
                log::debug!("✅ Found {} matches for template '{}'", hits.len(), class);
            }
            detections.insert(class, hits);
        }

        log::debug!(
            "🔍 Matched {} templates in {}ms ({} hits)",
            MATCH_WORKERS,
            start.elapsed().as_millis(),
            detections.total()
        );
        Ok(detections)
    }
}
