//! Sequential batch runner.
//!
//! Jobs run one at a time with a fixed pause between calls. Every job yields
//! exactly one result, in input order, whatever happens to the others.
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::generation::generator::Generator;
use crate::generation::models::{GenerationOptions, GenerationResult, PromptJob};

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    /// Always true; failures are reported per result.
    pub success: bool,
    pub message: String,
    pub count: usize,
    pub results: Vec<GenerationResult>,
}

impl BatchOutcome {
    fn from_results(results: Vec<GenerationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        BatchOutcome {
            success: true,
            message: format!("Generation finished. {} of {} images generated.", succeeded, results.len()),
            count: results.len(),
            results,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }
}

pub struct BatchOrchestrator {
    generator: Arc<Generator>,
    pacing: Duration,
}

impl BatchOrchestrator {
    pub fn new(generator: Arc<Generator>, pacing: Duration) -> Self {
        BatchOrchestrator { generator, pacing }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Run `jobs` in order, sharing `options` and `base_image`.
    pub async fn run(
        &self,
        jobs: &[PromptJob],
        options: &GenerationOptions,
        base_image: Option<&str>,
    ) -> BatchOutcome {
        let span = tracing::info_span!("batch", id = %Uuid::new_v4(), jobs = jobs.len());
        async move {
            tracing::info!("Starting batch of {} jobs", jobs.len());
            let mut results = Vec::with_capacity(jobs.len());
            for (position, job) in jobs.iter().enumerate() {
                if position > 0 && !self.pacing.is_zero() {
                    tokio::time::sleep(self.pacing).await;
                }
                tracing::info!("Generation {}/{}", position + 1, jobs.len());
                results.push(self.generator.generate(job, options, base_image).await);
            }
            let outcome = BatchOutcome::from_results(results);
            tracing::info!("{}", outcome.message);
            outcome
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generator::SimulatedLatency;
    use crate::seedream::{ApiMode, SeedreamClient};

    fn paced(mode: ApiMode, latency: SimulatedLatency, pacing: Duration) -> BatchOrchestrator {
        let client = SeedreamClient::new("http://127.0.0.1:1", "k", "m", Duration::from_secs(2)).unwrap();
        let generator = Generator::new(client, mode, vec![]).with_latency(latency);
        BatchOrchestrator::new(Arc::new(generator), pacing)
    }

    fn orchestrator(mode: ApiMode) -> BatchOrchestrator {
        paced(mode, SimulatedLatency::none(), Duration::ZERO)
    }

    // Paused-clock sleeps land on millisecond ticks.
    fn assert_elapsed(actual: Duration, expected: Duration) {
        assert!(
            actual >= expected && actual < expected + Duration::from_millis(10),
            "elapsed {:?}, expected {:?}",
            actual,
            expected
        );
    }

    #[tokio::test]
    async fn empty_batch_is_not_an_error() {
        let outcome = orchestrator(ApiMode::Demo).run(&[], &GenerationOptions::default(), None).await;
        assert!(outcome.success);
        assert_eq!(outcome.count, 0);
        assert!(outcome.results.is_empty());
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let jobs = PromptJob::from_texts(["one", "two", "three"]);
        let outcome = orchestrator(ApiMode::Demo).run(&jobs, &GenerationOptions::default(), None).await;
        let prompts: Vec<_> = outcome.results.iter().map(|r| (r.index, r.prompt.as_str())).collect();
        assert_eq!(prompts, vec![(0, "one"), (1, "two"), (2, "three")]);
        assert_eq!(outcome.succeeded(), 3);
    }

    #[tokio::test]
    async fn failing_jobs_do_not_abort_the_batch() {
        let jobs = PromptJob::from_texts(["a", "b"]);
        let outcome = orchestrator(ApiMode::Production).run(&jobs, &GenerationOptions::default(), None).await;
        assert!(outcome.success);
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.results.iter().all(|r| !r.success && r.demo_mode));
        assert_eq!(outcome.succeeded(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_only_between_calls() {
        let pacing = Duration::from_millis(300);
        let batches = paced(ApiMode::Demo, SimulatedLatency::none(), pacing);
        let jobs = PromptJob::from_texts(["a", "b", "c"]);

        let start = tokio::time::Instant::now();
        let outcome = batches.run(&jobs, &GenerationOptions::default(), None).await;

        assert_eq!(outcome.results.len(), 3);
        assert_elapsed(start.elapsed(), pacing * 2);
    }

    #[tokio::test(start_paused = true)]
    async fn single_job_is_not_paced() {
        let batches = paced(ApiMode::Demo, SimulatedLatency::none(), Duration::from_secs(1));
        let start = tokio::time::Instant::now();
        batches.run(&PromptJob::from_texts(["only"]), &GenerationOptions::default(), None).await;
        assert_elapsed(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn jobs_never_overlap() {
        // Sequential runs add every latency and every pause; overlap would finish sooner.
        let latency = SimulatedLatency::default();
        let pacing = Duration::from_millis(1000);
        let batches = paced(ApiMode::Demo, latency, pacing);
        let jobs = PromptJob::from_texts(["a", "b", "c"]);

        let start = tokio::time::Instant::now();
        batches.run(&jobs, &GenerationOptions::default(), None).await;

        assert_elapsed(start.elapsed(), latency.normal * 3 + pacing * 2);
    }
}
