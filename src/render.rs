use std::thread;

use crate::{
    ast::Program,
    interpreter::evaluator::core::{EvalResult, Evaluator},
    util::num::usize_to_f64,
};

/// Renders `count` samples of `name` at `frequency`.
///
/// Sample `i` is taken at time `i / sample_rate`. One evaluator is reused
/// for the whole table so the frame arena is allocated once.
///
/// # Errors
/// Returns the first runtime error, in sample order.
///
/// # Example
/// ```
/// use sythin::{interpreter::parser::core::parse_program, render::render};
///
/// let program = parse_program("ramp = \\f.\\t. t * 4").unwrap();
/// assert_eq!(render(&program, "ramp", 1.0, 4, 4).unwrap(), [0.0, 1.0, 2.0, 3.0]);
/// ```
pub fn render(program: &Program,
              name: &str,
              frequency: f64,
              sample_rate: u32,
              count: usize)
              -> EvalResult<Vec<f64>> {
    render_range(program, name, frequency, sample_rate, 0..count)
}

/// Renders the same table as [`render`], split across `workers` threads.
///
/// The index range is cut into contiguous chunks, one per worker, and each
/// worker evaluates its chunk with a private evaluator against the shared
/// program. The output is identical to [`render`]. The worker count is
/// clamped to the available parallelism and to `count`, and `0` is treated
/// as `1`.
///
/// # Errors
/// Returns the error of the earliest failing chunk.
pub fn render_parallel(program: &Program,
                       name: &str,
                       frequency: f64,
                       sample_rate: u32,
                       count: usize,
                       workers: usize)
                       -> EvalResult<Vec<f64>> {
    let workers = worker_count(workers, count);
    if workers == 1 {
        return render(program, name, frequency, sample_rate, count);
    }

    let chunk = count.div_ceil(workers);
    let chunks = thread::scope(|scope| {
        let handles: Vec<_> = (0..count).step_by(chunk)
                                        .map(|start| {
                                            let end = (start + chunk).min(count);
                                            scope.spawn(move || {
                                                     render_range(program, name, frequency, sample_rate, start..end)
                                                 })
                                        })
                                        .collect();
        handles.into_iter().map(join).collect::<Vec<_>>()
    });

    let mut samples = Vec::with_capacity(count);
    for chunk in chunks {
        samples.extend(chunk?);
    }
    Ok(samples)
}

/// Evaluates `name` at arbitrary `(frequency, time)` points.
///
/// Results are returned in input order. With more than one worker, the
/// points are split into contiguous chunks as in [`render_parallel`], with
/// the same clamping of the worker count.
///
/// # Errors
/// Returns the error of the earliest failing point.
pub fn render_points(program: &Program, name: &str, points: &[(f64, f64)], workers: usize) -> EvalResult<Vec<f64>> {
    let workers = worker_count(workers, points.len());
    let evaluate_all = |points: &[(f64, f64)]| -> EvalResult<Vec<f64>> {
        let mut evaluator = Evaluator::new(program);
        points.iter()
              .map(|&(frequency, time)| evaluator.evaluate_definition(name, frequency, time))
              .collect()
    };

    if workers == 1 {
        return evaluate_all(points);
    }

    let chunk = points.len().div_ceil(workers);
    let chunks = thread::scope(|scope| {
        let handles: Vec<_> = points.chunks(chunk)
                                    .map(|part| scope.spawn(move || evaluate_all(part)))
                                    .collect();
        handles.into_iter().map(join).collect::<Vec<_>>()
    });

    let mut results = Vec::with_capacity(points.len());
    for chunk in chunks {
        results.extend(chunk?);
    }
    Ok(results)
}

/// Number of threads actually used for `requested` workers over `jobs` items.
///
/// Never more than the machine's available parallelism or the number of
/// items, and never less than one.
fn worker_count(requested: usize, jobs: usize) -> usize {
    let available = thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    requested.min(available).min(jobs).max(1)
}

fn render_range(program: &Program,
                name: &str,
                frequency: f64,
                sample_rate: u32,
                indices: std::ops::Range<usize>)
                -> EvalResult<Vec<f64>> {
    let rate = f64::from(sample_rate);
    let mut evaluator = Evaluator::new(program);
    indices.map(|i| evaluator.evaluate_definition(name, frequency, usize_to_f64(i) / rate))
           .collect()
}

/// Waits for a worker, re-raising its panic on the calling thread.
fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RuntimeError, interpreter::parser::core::parse_program};

    const SOURCE: &str = "main = \\f.\\t. sin(2 * pi * f * t) + case floor (t * 10) of 3 -> 1, _ -> 0 end";

    #[test]
    fn parallel_matches_sequential() {
        let program = parse_program(SOURCE).unwrap();
        let sequential = render(&program, "main", 220.0, 1000, 997).unwrap();
        for workers in [0, 1, 2, 3, 8, 2000] {
            let parallel = render_parallel(&program, "main", 220.0, 1000, 997, workers).unwrap();
            assert_eq!(parallel, sequential, "workers = {workers}");
        }
    }

    #[test]
    fn huge_worker_counts_are_clamped() {
        let program = parse_program(SOURCE).unwrap();
        let sequential = render(&program, "main", 220.0, 48_000, 48_000).unwrap();
        let parallel = render_parallel(&program, "main", 220.0, 48_000, 48_000, usize::MAX).unwrap();
        assert_eq!(parallel, sequential);

        let points: Vec<_> = (0..10_000).map(|i| (1.0, f64::from(i) / 1000.0)).collect();
        assert_eq!(render_points(&program, "main", &points, 1_000_000).unwrap().len(), 10_000);
    }

    #[test]
    fn worker_count_bounds() {
        assert_eq!(worker_count(0, 100), 1);
        assert_eq!(worker_count(8, 0), 1);
        assert_eq!(worker_count(8, 1), 1);
        assert!(worker_count(usize::MAX, usize::MAX) <= thread::available_parallelism().map_or(1, |n| n.get()));
    }

    #[test]
    fn points_keep_input_order() {
        let program = parse_program("main = \\f.\\t. f - t").unwrap();
        let points: Vec<_> = (0..50).map(|i| (f64::from(i), 1.0)).collect();
        let expected: Vec<_> = (0..50).map(|i| f64::from(i) - 1.0).collect();
        assert_eq!(render_points(&program, "main", &points, 4).unwrap(), expected);
        assert_eq!(render_points(&program, "main", &[], 4).unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn errors_propagate_from_workers() {
        let program = parse_program("main = \\f.\\t. if t > 0.5 then nope else 0 end").unwrap();
        let err = render_parallel(&program, "main", 1.0, 10, 10, 3).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownIdentifier { .. }));
    }
}
