//! Supervised external processes and fixed-interval polling.
//!
//! The spawned tools have no cooperative cancellation protocol:
//! supervision is spawn, poll the filesystem on a fixed interval against
//! a hard timeout budget, then terminate.

use crate::{PipelineError, PipelineResult};
use std::process::{Child, Command};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What a poll check observed.
pub enum Progress<T> {
    /// The goal is reached; stop polling.
    Done(T),
    /// Not done, but partial output exists.
    Partial(T),
    /// Nothing usable yet.
    Empty,
}

/// Final outcome of a bounded polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome<T> {
    Completed(T),
    TimedOutPartial(T),
    TimedOutEmpty,
}

/// Poll `check` every `step` until it reports `Done` or `timeout`
/// elapses. On timeout the last observation decides between
/// `TimedOutPartial` and `TimedOutEmpty`.
pub fn poll_with_timeout<T>(
    timeout: Duration,
    step: Duration,
    mut check: impl FnMut() -> Progress<T>,
) -> PollOutcome<T> {
    let started = Instant::now();
    loop {
        match check() {
            Progress::Done(value) => return PollOutcome::Completed(value),
            Progress::Partial(value) if started.elapsed() >= timeout => {
                return PollOutcome::TimedOutPartial(value);
            }
            Progress::Empty if started.elapsed() >= timeout => {
                return PollOutcome::TimedOutEmpty;
            }
            _ => {}
        }
        std::thread::sleep(step);
    }
}

/// A spawned external process with explicit termination.
#[derive(Debug)]
pub struct SupervisedProcess {
    name: String,
    child: Child,
}

impl SupervisedProcess {
    /// Spawn the command. The process runs unsupervised until
    /// [`terminate`](Self::terminate) or [`wait`](Self::wait).
    pub fn spawn(mut command: Command, name: &str) -> PipelineResult<Self> {
        let child = command.spawn().map_err(|source| PipelineError::ToolLaunch {
            tool: name.to_string(),
            source,
        })?;
        debug!(name, pid = child.id(), "process spawned");
        Ok(Self {
            name: name.to_string(),
            child,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Block until the process exits; error on nonzero status.
    pub fn wait(mut self) -> PipelineResult<()> {
        let status = self.child.wait()?;
        if !status.success() {
            return Err(PipelineError::ToolFailed {
                tool: self.name,
                code: status.code(),
            });
        }
        Ok(())
    }

    /// Stop the process: graceful signal where the platform has one,
    /// escalating to a forced kill, then reap it.
    pub fn terminate(&mut self) -> PipelineResult<()> {
        #[cfg(unix)]
        {
            // SIGTERM first; the kill below escalates.
            unsafe {
                libc::kill(self.child.id() as libc::pid_t, libc::SIGTERM);
            }
            std::thread::sleep(Duration::from_millis(100));
        }
        match self.child.kill() {
            Ok(()) => {}
            // already exited
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(e.into()),
        }
        let status = self.child.wait()?;
        warn!(name = %self.name, ?status, "process terminated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_immediately_when_done() {
        let outcome = poll_with_timeout(Duration::from_secs(5), Duration::from_millis(1), || {
            Progress::Done(42)
        });
        assert_eq!(outcome, PollOutcome::Completed(42));
    }

    #[test]
    fn times_out_empty() {
        let outcome = poll_with_timeout(
            Duration::from_millis(5),
            Duration::from_millis(1),
            || Progress::<u32>::Empty,
        );
        assert_eq!(outcome, PollOutcome::TimedOutEmpty);
    }

    #[test]
    fn times_out_with_partial_result() {
        let mut best = 0;
        let outcome = poll_with_timeout(Duration::from_millis(5), Duration::from_millis(1), || {
            best += 1;
            Progress::Partial(best)
        });
        assert!(matches!(outcome, PollOutcome::TimedOutPartial(n) if n > 0));
    }

    #[test]
    fn done_wins_after_progress() {
        let mut calls = 0;
        let outcome = poll_with_timeout(Duration::from_secs(5), Duration::from_millis(1), || {
            calls += 1;
            if calls < 3 {
                Progress::Partial(calls)
            } else {
                Progress::Done(calls)
            }
        });
        assert_eq!(outcome, PollOutcome::Completed(3));
    }
}
