use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer and linear-algebra operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Linear algebra ----
    /// Cholesky factorization failed; the matrix is not (numerically)
    /// positive definite.
    NotPositiveDefinite {
        dim: usize,
    },

    /// Symmetric eigendecomposition produced non-finite eigenvalues.
    EigenDecompositionFailed {
        dim: usize,
    },

    /// Matrix and right-hand side shapes do not line up.
    SingularSystem {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    /// More trend columns than observations; no residual space is left.
    NoResidualSpace {
        n_obs: usize,
        n_trend: usize,
    },

    // ---- Solver configuration ----
    /// Golden-section bracket must satisfy `lower < upper`, both finite.
    InvalidBracket {
        lower: f64,
        upper: f64,
        reason: &'static str,
    },
    /// Tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: u64,
        reason: &'static str,
    },
    /// Starting point must lie inside the bracket.
    InvalidStart {
        start: f64,
        lower: f64,
        upper: f64,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Solver finished without a best parameter.
    MissingBestParam,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Linear algebra ----
            OptError::NotPositiveDefinite { dim } => {
                write!(f, "Matrix of dimension {dim} is not positive definite")
            }
            OptError::EigenDecompositionFailed { dim } => {
                write!(f, "Eigendecomposition of a {dim}x{dim} matrix produced non-finite values")
            }
            OptError::SingularSystem { rows, cols, reason } => {
                write!(f, "Cannot solve system with matrix of shape ({rows}, {cols}): {reason}")
            }
            OptError::NoResidualSpace { n_obs, n_trend } => {
                write!(
                    f,
                    "No residual degrees of freedom: {n_obs} observations for {n_trend} trend columns"
                )
            }

            // ---- Solver configuration ----
            OptError::InvalidBracket { lower, upper, reason } => {
                write!(f, "Invalid bracket [{lower}, {upper}]: {reason}")
            }
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidStart { start, lower, upper } => {
                write!(f, "Starting point {start} lies outside the bracket [{lower}, {upper}]")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::MissingBestParam => {
                write!(f, "Solver finished without a best parameter")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised inside our own cost functions travel through argmin
        // boxed; recover them first.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
