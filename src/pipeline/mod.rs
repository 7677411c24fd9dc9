//! Sequential task pipelines.
//!
//! A pipeline is an ordered list of [`Task`]s. [`run_series`] executes them
//! strictly in order: a task that recovers from a diagnostic lets the rest
//! proceed, a task that fails aborts the remainder.
//!
//! Watch bindings and the CLI flows both run their work through this seam,
//! so ordering and abort semantics live in exactly one place.

pub mod tasks;

pub use tasks::{ReloadTask, ScriptsTask, StylesTask};

use anyhow::Result;

/// How a task finished, short of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Completed; its effects are in place.
    Done,
    /// Hit a recoverable diagnostic: already logged, effects skipped.
    Recovered,
}

/// A unit of pipeline work.
///
/// Implementations decide which of their failures are recoverable: returning
/// `Ok(Recovered)` keeps the series going, `Err` aborts it.
pub trait Task {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Run the task to completion.
    fn run(&self) -> Result<TaskOutcome>;
}

/// Run `tasks` strictly in order.
///
/// Stops at the first hard failure, naming the task that failed. Recovered
/// tasks do not stop the series; the returned outcome says whether the whole
/// series ran clean or any task recovered along the way.
pub fn run_series(tasks: &[&dyn Task]) -> Result<TaskOutcome> {
    let mut outcome = TaskOutcome::Done;

    for task in tasks {
        match task.run() {
            Ok(TaskOutcome::Done) => {}
            Ok(TaskOutcome::Recovered) => {
                crate::debug!("pipeline"; "{} recovered, continuing", task.name());
                outcome = TaskOutcome::Recovered;
            }
            Err(err) => return Err(err.context(format!("task `{}` failed", task.name()))),
        }
    }

    Ok(outcome)
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Copy)]
    enum Behavior {
        Done,
        Recovered,
        Fail,
    }

    struct Probe<'a> {
        name: &'static str,
        behavior: Behavior,
        ran: &'a Mutex<Vec<&'static str>>,
    }

    impl Task for Probe<'_> {
        fn name(&self) -> &'static str {
            self.name
        }

        fn run(&self) -> Result<TaskOutcome> {
            self.ran.lock().unwrap().push(self.name);
            match self.behavior {
                Behavior::Done => Ok(TaskOutcome::Done),
                Behavior::Recovered => Ok(TaskOutcome::Recovered),
                Behavior::Fail => Err(anyhow::anyhow!("boom")),
            }
        }
    }

    fn probe<'a>(
        name: &'static str,
        behavior: Behavior,
        ran: &'a Mutex<Vec<&'static str>>,
    ) -> Probe<'a> {
        Probe {
            name,
            behavior,
            ran,
        }
    }

    #[test]
    fn test_runs_in_declared_order() {
        let ran = Mutex::new(Vec::new());
        let (a, b, c) = (
            probe("styles", Behavior::Done, &ran),
            probe("scripts", Behavior::Done, &ran),
            probe("reload", Behavior::Done, &ran),
        );

        let outcome = run_series(&[&a, &b, &c]).unwrap();
        assert_eq!(*ran.lock().unwrap(), vec!["styles", "scripts", "reload"]);
        assert_eq!(outcome, TaskOutcome::Done);
    }

    #[test]
    fn test_recovered_task_does_not_stop_series() {
        let ran = Mutex::new(Vec::new());
        let (a, b, c) = (
            probe("styles", Behavior::Recovered, &ran),
            probe("scripts", Behavior::Done, &ran),
            probe("reload", Behavior::Done, &ran),
        );

        let outcome = run_series(&[&a, &b, &c]).unwrap();
        // The rest still runs, in order, and the recovery is reported
        assert_eq!(*ran.lock().unwrap(), vec!["styles", "scripts", "reload"]);
        assert_eq!(outcome, TaskOutcome::Recovered);
    }

    #[test]
    fn test_failure_aborts_remainder() {
        let ran = Mutex::new(Vec::new());
        let (a, b, c) = (
            probe("styles", Behavior::Done, &ran),
            probe("scripts", Behavior::Fail, &ran),
            probe("reload", Behavior::Done, &ran),
        );

        let err = run_series(&[&a, &b, &c]).unwrap_err();
        assert!(err.to_string().contains("scripts"));
        assert_eq!(*ran.lock().unwrap(), vec!["styles", "scripts"]);
    }

    #[test]
    fn test_empty_series_is_ok() {
        assert_eq!(run_series(&[]).unwrap(), TaskOutcome::Done);
    }
}
