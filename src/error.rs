use thiserror::Error;

/// Parameter sets that cannot drive a run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Chain must contain at least one block")]
    NoBlocks,

    #[error("Block mass must be positive, got {0}")]
    NonPositiveMass(f64),

    #[error("Timesteps must be positive, got dt1={dt_coarse} dt2={dt_fine}")]
    NonPositiveTimestep { dt_coarse: f64, dt_fine: f64 },

    #[error("Fine timestep {dt_fine} must be smaller than coarse timestep {dt_coarse}")]
    FineNotFiner { dt_coarse: f64, dt_fine: f64 },

    #[error("Final time must be positive, got {0}")]
    NonPositiveFinalTime(f64),

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}

/// Failures while assembling the run configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not parse value {value:?} for {tag}")]
    BadValue { tag: String, value: String },

    #[error("Unknown mode {0:?}, expected \"distribution\" or \"single\"")]
    UnknownMode(String),

    #[error("Config file error: {0}")]
    File(#[from] confy::ConfyError),

    #[error(transparent)]
    Params(#[from] ParamError),
}
