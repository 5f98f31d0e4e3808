use hw_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid density range {start}..={stop} step {delta}")]
    Range { start: f64, stop: f64, delta: f64 },

    #[error("sweep point {index} out of range (sweep has {len} points)")]
    PointIndex { index: usize, len: usize },
}

pub type SweepResult<T> = Result<T, SweepError>;
