//! Timing and logging around public operations
//!
//! Wraps a closure, measures how long it ran, and logs the outcome. Used at
//! the dispatcher, planner and tool boundaries instead of sprinkling timing
//! code through each function.

use std::fmt::Display;
use std::time::Instant;

use log::{debug, error};

/// Run a fallible operation, logging its duration and any error
pub fn timed<T, E: Display>(operation: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    match &result {
        Ok(_) => debug!("{} completed in {:.1}ms", operation, elapsed_ms),
        Err(e) => error!("{} failed after {:.1}ms: {}", operation, elapsed_ms, e),
    }
    result
}

/// Run an infallible operation, logging its duration
pub fn observed<T>(operation: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = f();
    debug!(
        "{} completed in {:.1}ms",
        operation,
        start.elapsed().as_secs_f64() * 1000.0
    );
    value
}
