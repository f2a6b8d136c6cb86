//! Execution helper that runs the golden-section solver on a log-likelihood
//! problem and returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::GoldenSection,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};

/// Run a golden-section search for a log-likelihood problem.
///
/// Wires up the adapted problem, the solver, the starting point `start`,
/// the iteration cap from `opts.tols.max_iter` and, behind the `obs_slog`
/// feature, a terminal observer when `opts.verbose` is set. The result is
/// converted into [`OptimOutcome`] with the log-likelihood sign restored.
///
/// # Errors
/// - Propagates Argmin runtime errors and any `OptError` raised by the
///   user's `value` via `From<argmin::core::Error>`.
/// - Propagates validation errors encountered when constructing the outcome.
pub fn run_golden_section<'a, F>(
    start: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: GoldenSection,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(start, &problem)?;
    }
    let max_iter = opts.tols.max_iter;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(start).max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(start: Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(&start)?;
    tracing::debug!(start, ll0, "golden-section initial state");
    Ok(())
}
