use thiserror::Error;

/// Everything in this crate is pure computation, so every error is a caller
/// or configuration mistake. Nothing here is retryable.
#[derive(Debug, Error)]
pub enum BeamError {
    #[error("carrier frequency must be positive, got {0} Hz")]
    NonPositiveFrequency(f64),

    #[error("speed of light must be positive, got {0} m/s")]
    NonPositiveSpeedOfLight(f64),

    #[error("array must contain at least one element")]
    EmptyArray,

    #[error("element spacing must be positive, got {0} m")]
    NonPositiveSpacing(f64),

    #[error("element index {index} out of range for a {element_count}-element array")]
    ElementIndexOutOfRange { index: usize, element_count: usize },

    #[error("phase vector has {actual} entries but the array has {expected} elements")]
    PhaseLengthMismatch { expected: usize, actual: usize },

    #[error("observation sweep must contain at least one angle")]
    EmptySweep,

    #[error("observation sweep bounds must be finite, got {start}..{stop}")]
    NonFiniteSweep { start: f64, stop: f64 },

    #[error("baseline must be positive, got {0} m")]
    NonPositiveBaseline(f64),

    #[error("SNR must be positive on a linear scale, got {0}")]
    NonPositiveSnr(f64),

    #[error("phase error {sigma_phi} rad is ambiguous on a {baseline} m baseline (asin argument {argument} > 1)")]
    AmbiguousBaseline {
        baseline: f64,
        sigma_phi: f64,
        argument: f64,
    },

    #[error("fit needs matching abscissa and ordinate lengths, got {x} and {y}")]
    FitLengthMismatch { x: usize, y: usize },

    #[error("fit needs at least two points, got {0}")]
    TooFewFitPoints(usize),

    #[error("fit abscissa must be positive, got {0}")]
    NonPositiveFitAbscissa(f64),

    #[error("fit normal equations are singular")]
    SingularFit,

    #[error("failed to draw chart: {0}")]
    Plot(String),

    #[error("invalid scenario configuration: {0}")]
    Config(String),

    #[error("failed to parse scenario file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BeamError>;
