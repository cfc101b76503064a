use std::fmt;

/// Error types of the fixed-step IVP machinery
///
/// NaN or infinite values coming out of a derivative or exact-solution function are not
/// errors: they are carried through the trajectories as ordinary samples.
#[derive(Debug, Clone, PartialEq)]
pub enum IVPError {
    /// both or neither of (step count, step size) given, or they resolve to unusable values
    InvalidGridSpecification(String),
    /// approximate trajectory is shorter than the exact one it is compared against
    LengthMismatch { approx: usize, exact: usize },
    /// step size is zero, NaN or infinite while steps are requested
    InvalidStepSize(f64),
    InvalidInput(String),
    Config(String),
    Plot(String),
}

impl fmt::Display for IVPError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IVPError::InvalidGridSpecification(msg) => {
                write!(f, "Invalid grid specification: {}", msg)
            }
            IVPError::LengthMismatch { approx, exact } => write!(
                f,
                "Length mismatch: approximate trajectory has {} samples, exact trajectory has {}",
                approx, exact
            ),
            IVPError::InvalidStepSize(h) => {
                write!(f, "Step size must be finite and nonzero (got {})", h)
            }
            IVPError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            IVPError::Config(msg) => write!(f, "Task configuration error: {}", msg),
            IVPError::Plot(msg) => write!(f, "Plotting error: {}", msg),
        }
    }
}

impl std::error::Error for IVPError {}
