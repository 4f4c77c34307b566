//! Asynchronous chunk generation on a pool of worker threads.
//!
//! Every worker owns a [`ChunkGenerator`] (and with it a private decorator
//! chain) over one shared [`WorldGenContext`], so no mutable state crosses
//! threads. Requests are accepted into a bounded queue, can be cancelled until
//! their result is delivered, and come back in completion order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use strata_config::WorkerConfig;
use strata_voxel::ChunkPos;

use crate::context::WorldGenContext;
use crate::error::GenerationError;
use crate::generator::{ChunkGenerator, GeneratedChunk};

/// Outcome of one background generation request.
#[derive(Debug)]
pub struct GenerationResult {
    pub pos: ChunkPos,
    pub result: Result<GeneratedChunk, GenerationError>,
}

/// Reasons a request is not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("generation queue is full ({0} requests in flight)")]
    QueueFull(u64),

    #[error("chunk {0} is already pending")]
    AlreadyPending(ChunkPos),

    #[error("all generation workers have stopped")]
    Disconnected,
}

/// Internal wrapper that carries the request and its cancellation flag.
struct PendingRequest {
    pos: ChunkPos,
    cancelled: Arc<AtomicBool>,
}

struct Delivery {
    cancelled: Arc<AtomicBool>,
    result: GenerationResult,
}

/// Manages background chunk generation across a thread pool.
pub struct AsyncChunkGenerator {
    request_sender: Sender<PendingRequest>,
    /// Held so the request queue stays connected when the pool has no workers.
    _request_receiver: Receiver<PendingRequest>,
    result_receiver: Receiver<Delivery>,
    /// Cancellation flag per pending chunk.
    active: Arc<DashMap<ChunkPos, Arc<AtomicBool>>>,
    /// Queued plus running requests.
    in_flight: Arc<AtomicU64>,
    max_in_flight: u64,
    thread_count: usize,
}

impl AsyncChunkGenerator {
    /// Spawns `thread_count` workers over `ctx`.
    ///
    /// - `max_in_flight`: queued plus running requests before [`submit`](Self::submit)
    ///   rejects new ones.
    /// - `result_capacity`: finished results buffered before workers block.
    pub fn new(
        ctx: Arc<WorldGenContext>,
        thread_count: usize,
        max_in_flight: usize,
        result_capacity: usize,
    ) -> Self {
        let max_in_flight = max_in_flight.max(1);
        let (request_sender, request_receiver) = bounded::<PendingRequest>(max_in_flight);
        let (result_sender, result_receiver) = bounded::<Delivery>(result_capacity.max(1));
        let in_flight = Arc::new(AtomicU64::new(0));

        for index in 0..thread_count {
            let receiver = request_receiver.clone();
            let sender = result_sender.clone();
            let in_flight = Arc::clone(&in_flight);
            let mut generator = ChunkGenerator::new(Arc::clone(&ctx));

            std::thread::Builder::new()
                .name(format!("strata-gen-{index}"))
                .spawn(move || {
                    while let Ok(request) = receiver.recv() {
                        // Check cancellation before starting work.
                        if request.cancelled.load(Ordering::Relaxed) {
                            in_flight.fetch_sub(1, Ordering::Relaxed);
                            continue;
                        }

                        let result = generator.generate(request.pos);
                        if let Err(err) = &result {
                            tracing::warn!("Chunk {} failed: {err}", request.pos);
                        }

                        // Check cancellation after generation.
                        if !request.cancelled.load(Ordering::Relaxed) {
                            let _ = sender.send(Delivery {
                                cancelled: request.cancelled,
                                result: GenerationResult {
                                    pos: request.pos,
                                    result,
                                },
                            });
                        }

                        in_flight.fetch_sub(1, Ordering::Relaxed);
                    }
                })
                .expect("Failed to spawn chunk generation worker thread");
        }

        tracing::info!(
            "Chunk generation pool started: {} workers, {} max in flight",
            thread_count,
            max_in_flight
        );

        Self {
            request_sender,
            _request_receiver: request_receiver,
            result_receiver,
            active: Arc::new(DashMap::new()),
            in_flight,
            max_in_flight: max_in_flight as u64,
            thread_count,
        }
    }

    /// Builds the pool from worker settings. `threads == 0` picks
    /// [`default_thread_count`].
    pub fn from_config(ctx: Arc<WorldGenContext>, config: &WorkerConfig) -> Self {
        let threads = if config.threads == 0 {
            default_thread_count()
        } else {
            config.threads
        };
        Self::new(ctx, threads, config.max_in_flight, config.result_capacity)
    }

    pub fn with_defaults(ctx: Arc<WorldGenContext>) -> Self {
        Self::from_config(ctx, &WorkerConfig::default())
    }

    pub fn thread_count(&self) -> usize {
        self.thread_count
    }

    /// Queues `pos` for generation.
    ///
    /// # Errors
    ///
    /// [`SubmitError`] if the queue is full, `pos` is already pending, or the
    /// workers are gone. Nothing is queued in that case.
    pub fn submit(&self, pos: ChunkPos) -> Result<(), SubmitError> {
        let queued = self.in_flight.load(Ordering::Relaxed);
        if queued >= self.max_in_flight {
            return Err(SubmitError::QueueFull(queued));
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        match self.active.entry(pos) {
            Entry::Occupied(_) => return Err(SubmitError::AlreadyPending(pos)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&cancelled));
            }
        }
        self.in_flight.fetch_add(1, Ordering::Relaxed);

        self.request_sender
            .try_send(PendingRequest { pos, cancelled })
            .map_err(|err| {
                self.in_flight.fetch_sub(1, Ordering::Relaxed);
                self.active.remove(&pos);
                match err {
                    TrySendError::Full(_) => SubmitError::QueueFull(self.max_in_flight),
                    TrySendError::Disconnected(_) => SubmitError::Disconnected,
                }
            })
    }

    /// Cancels a pending or running request. A result that was already
    /// delivered stays in the result queue.
    pub fn cancel(&self, pos: ChunkPos) {
        if let Some((_, cancelled)) = self.active.remove(&pos) {
            cancelled.store(true, Ordering::Relaxed);
        }
    }

    /// Takes every finished result without blocking.
    pub fn drain_results(&self) -> Vec<GenerationResult> {
        let mut results = Vec::new();
        while let Ok(delivery) = self.result_receiver.try_recv() {
            results.push(self.settle(delivery));
        }
        results
    }

    /// Waits up to `timeout` for the next finished result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<GenerationResult> {
        self.result_receiver
            .recv_timeout(timeout)
            .ok()
            .map(|delivery| self.settle(delivery))
    }

    /// Number of requests queued or running.
    pub fn in_flight_count(&self) -> u64 {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Returns `true` if a request for `pos` has been submitted and its
    /// result not yet taken.
    pub fn is_pending(&self, pos: ChunkPos) -> bool {
        self.active.contains_key(&pos)
    }

    fn settle(&self, delivery: Delivery) -> GenerationResult {
        // A cancelled-then-resubmitted chunk owns a newer flag; keep it.
        self.active
            .remove_if(&delivery.result.pos, |_, flag| Arc::ptr_eq(flag, &delivery.cancelled));
        delivery.result
    }
}

/// One worker per logical CPU, leaving one for the caller.
pub fn default_thread_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use strata_config::GeneratorPreset;

    use crate::seed::hash_chunk_data;

    fn context(seed: u64) -> Arc<WorldGenContext> {
        Arc::new(WorldGenContext::new(seed, GeneratorPreset::default()).unwrap())
    }

    fn collect(generator: &AsyncChunkGenerator, expected: usize) -> Vec<GenerationResult> {
        let mut results = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(60);
        while results.len() < expected && Instant::now() < deadline {
            if let Some(result) = generator.recv_timeout(Duration::from_millis(50)) {
                results.push(result);
            }
        }
        results
    }

    #[test]
    fn test_concurrent_generation_is_safe() {
        let generator = AsyncChunkGenerator::new(context(42), 4, 64, 64);

        let mut submitted = 0;
        for x in -3..3 {
            for z in -3..3 {
                if generator.submit(ChunkPos::new(x, z)).is_ok() {
                    submitted += 1;
                }
            }
        }

        let results = collect(&generator, submitted);
        assert_eq!(
            results.len(),
            submitted,
            "Should receive all submitted chunks: got {}/{submitted}",
            results.len()
        );
        assert!(results.iter().all(|r| r.result.is_ok()));
        assert_eq!(generator.in_flight_count(), 0);
    }

    #[test]
    fn test_pool_output_matches_single_threaded() {
        let ctx = context(356_556_635);
        let generator = AsyncChunkGenerator::new(Arc::clone(&ctx), 3, 32, 32);
        let positions: Vec<_> = (0..6).map(|i| ChunkPos::new(i, -i)).collect();
        for &pos in &positions {
            generator.submit(pos).unwrap();
        }

        let mut reference = ChunkGenerator::new(ctx);
        for result in collect(&generator, positions.len()) {
            let pooled = result.result.unwrap();
            let direct = reference.generate(result.pos).unwrap();
            assert_eq!(
                hash_chunk_data(&pooled.data),
                hash_chunk_data(&direct.data),
                "Pooled chunk {} differs from direct generation",
                result.pos
            );
        }
    }

    #[test]
    fn test_duplicate_submission_rejected() {
        // No workers: requests stay queued.
        let generator = AsyncChunkGenerator::new(context(1), 0, 8, 8);
        let pos = ChunkPos::new(4, 4);
        generator.submit(pos).unwrap();
        assert_eq!(generator.submit(pos), Err(SubmitError::AlreadyPending(pos)));
        assert!(generator.is_pending(pos));
        assert_eq!(generator.in_flight_count(), 1);
    }

    #[test]
    fn test_zero_worker_pool_accepts_requests() {
        let generator = AsyncChunkGenerator::new(context(1), 0, 4, 4);
        assert_eq!(generator.thread_count(), 0);
        for x in 0..4 {
            assert_eq!(generator.submit(ChunkPos::new(x, 0)), Ok(()));
        }
        assert_eq!(generator.in_flight_count(), 4);
        assert!(generator.drain_results().is_empty());
    }

    #[test]
    fn test_full_queue_rejected() {
        let generator = AsyncChunkGenerator::new(context(1), 0, 2, 8);
        generator.submit(ChunkPos::new(0, 0)).unwrap();
        generator.submit(ChunkPos::new(1, 0)).unwrap();
        assert_eq!(
            generator.submit(ChunkPos::new(2, 0)),
            Err(SubmitError::QueueFull(2))
        );
        assert!(!generator.is_pending(ChunkPos::new(2, 0)));
    }

    #[test]
    fn test_cancellation_clears_pending() {
        let generator = AsyncChunkGenerator::new(context(2), 2, 64, 64);
        let pos = ChunkPos::new(50, 50);
        generator.submit(pos).unwrap();
        generator.cancel(pos);
        assert!(!generator.is_pending(pos));

        // Race is acceptable: the chunk may have finished before cancellation.
        let deadline = Instant::now() + Duration::from_secs(30);
        while generator.in_flight_count() > 0 && Instant::now() < deadline {
            let _ = generator.drain_results();
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(generator.in_flight_count(), 0);
    }

    #[test]
    fn test_failed_chunk_is_reported_per_coordinate() {
        let generator = AsyncChunkGenerator::new(context(3), 1, 8, 8);
        let bad = ChunkPos::new(i32::MAX, 0);
        let good = ChunkPos::new(0, 0);
        generator.submit(bad).unwrap();
        generator.submit(good).unwrap();

        let results = collect(&generator, 2);
        assert_eq!(results.len(), 2);
        for result in results {
            if result.pos == bad {
                assert!(matches!(
                    result.result,
                    Err(GenerationError::CoordinateOutOfRange { .. })
                ));
            } else {
                assert!(result.result.is_ok(), "Failure leaked into chunk {}", result.pos);
            }
        }
        assert!(!generator.is_pending(bad));
        assert!(!generator.is_pending(good));
    }

    #[test]
    fn test_default_thread_count_is_positive() {
        assert!(default_thread_count() >= 1);
        let config = WorkerConfig {
            threads: 2,
            ..WorkerConfig::default()
        };
        assert_eq!(AsyncChunkGenerator::from_config(context(4), &config).thread_count(), 2);
    }
}
