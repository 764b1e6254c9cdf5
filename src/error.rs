use num::{BigInt, BigRational};

use crate::hail::Thrower;
use crate::input::InputError;
use crate::solver::AxisOrder;

/// Failures of the collision derivation. None of them are recoverable: the
/// computation is single-shot and has no fallback path.
#[derive(Debug, thiserror::Error)]
pub enum SolveError {
    #[error("need at least 3 moving points, got {0}")]
    NotEnoughPoints(usize),

    #[error("degenerate configuration ({order}): {reason}")]
    Degenerate {
        order: AxisOrder,
        reason: &'static str,
    },

    #[error("no admissible integer root for t0 (integer roots examined: {roots:?})")]
    NoIntegerRoot { order: AxisOrder, roots: Vec<BigInt> },

    #[error("ambiguous solution: t0 in {0:?} all give integer throwers")]
    AmbiguousRoots(Vec<BigInt>),

    #[error("{what} is not an exact integer: {value}")]
    NonInteger {
        what: &'static str,
        value: BigRational,
    },

    #[error("{what} does not fit in 64 bits: {value}")]
    Overflow { what: &'static str, value: BigInt },

    #[error("thrower misses moving point {0}")]
    MissedCollision(usize),

    #[error("linear system is singular")]
    Singular,

    #[error("cross-check disagrees: collision solver found {solver}, linear system found {linear}")]
    CrossCheckMismatch { solver: Thrower, linear: Thrower },
}

/// Everything `main` can report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("failed to encode instance: {0}")]
    Encode(#[from] serde_json::Error),
}
