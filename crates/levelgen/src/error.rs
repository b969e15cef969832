//! Failure modes surfaced to callers. Generation never retries on its own.

use crate::worker::JobId;

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// The cellular automaton produced a map that is entirely open or entirely ground.
    #[error("level {level_id}: degenerate map with {ground_tiles} of {total_tiles} tiles solid")]
    DegenerateMap { level_id: u32, ground_tiles: usize, total_tiles: usize },

    /// No surface reached the size threshold, so there is nowhere to place the player.
    #[error("level {level_id}: no surface with at least {min_surface_size} cells")]
    NoAcceptedSurface { level_id: u32, min_surface_size: usize },
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum WorkerError {
    #[error("no job with id {0} was submitted to this worker")]
    UnknownJob(JobId),

    #[error("job {0} panicked before replying")]
    JobPanicked(JobId),

    /// Too many replies are waiting to be collected with `wait` or `try_take`.
    #[error("worker already holds {outstanding} uncollected jobs")]
    Saturated { outstanding: usize },

    #[error("worker reply channel disconnected")]
    Disconnected,
}
