use hw_core::{HwError, Velocity};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] HwError),

    #[error("initial grid is {got_lanes}x{got_len}, configuration expects {n_lanes}x{lane_len}")]
    GridShape {
        n_lanes:   usize,
        lane_len:  usize,
        got_lanes: usize,
        got_len:   usize,
    },

    #[error("vehicle at lane {lane}, position {pos} has velocity {velocity} above the limit {max}")]
    VelocityAboveLimit {
        lane:     usize,
        pos:      usize,
        velocity: Velocity,
        max:      Velocity,
    },
}

pub type SimResult<T> = Result<T, SimError>;
