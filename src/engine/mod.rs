//! Runs generated programs against an injected capability object.
//!
//! The engine interprets the statement tree directly. Runtime failures are caught,
//! reported through the log sink and returned as an `ExecutionOutcome`; they never
//! propagate as panics.

use crate::ast::{Program, Statement};
use crate::graph::NodeId;
use crate::error::{EngineError, ExecutionError};
use crate::error::CapabilityError;
use crate::logging::LogSink;
use smol::Timer;
use std::future::Future;
use std::time::{Duration, Instant};

mod capabilities;

pub use capabilities::*;

/// Bounds on a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Maximum number of statements executed across all entry points.
    pub max_steps: u64,
    /// Wall-clock budget. Checked around every statement and raced against every
    /// capability call.
    pub deadline: Option<Duration>,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            deadline: None,
        }
    }
}

/// What happened when a program ran.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Completed { steps: u64 },
    Failed(ExecutionError),
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Completed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ExecutionEngine {
    limits: ExecutionLimits,
}

impl ExecutionEngine {
    pub fn new(limits: ExecutionLimits) -> Result<Self, EngineError> {
        if limits.max_steps == 0 {
            return Err(EngineError::InvalidLimits(
                "the step budget must be at least 1".to_string(),
            ));
        }
        if limits.deadline == Some(Duration::ZERO) {
            return Err(EngineError::InvalidLimits(
                "the deadline must be longer than zero".to_string(),
            ));
        }
        Ok(Self { limits })
    }

    pub fn limits(&self) -> ExecutionLimits {
        self.limits
    }

    /// Runs `program` to completion and reports the outcome to `sink`.
    pub async fn execute<C: Capabilities>(
        &self,
        program: &Program,
        capabilities: &mut C,
        sink: &mut dyn LogSink,
    ) -> ExecutionOutcome {
        match self.run(program, capabilities).await {
            Ok(steps) => {
                sink.success(&format!("Execution finished ({} step(s))", steps));
                ExecutionOutcome::Completed { steps }
            }
            Err(error) => {
                sink.error(&format!("Runtime error: {}", error));
                ExecutionOutcome::Failed(error)
            }
        }
    }

    /// Runs every entry point in order, awaiting each capability call. Returns the
    /// number of statements executed.
    pub async fn run<C: Capabilities>(
        &self,
        program: &Program,
        capabilities: &mut C,
    ) -> Result<u64, ExecutionError> {
        let started = Instant::now();
        let mut steps = 0u64;

        for entry in &program.entries {
            log::debug!("Running entry '{}' (#{})", entry.title, entry.node);
            let mut frames = vec![entry.body.statements.iter()];

            while let Some(frame) = frames.last_mut() {
                let Some(statement) = frame.next() else {
                    frames.pop();
                    continue;
                };
                steps += 1;
                self.check_budget(steps, started)?;

                match statement {
                    Statement::Print { node, value } => {
                        let value = value.evaluate();
                        self.call(*node, started, capabilities.print(&value)).await?;
                    }
                    Statement::Delay { node, millis } => {
                        let millis = millis.evaluate().to_number();
                        self.call(*node, started, capabilities.delay(millis)).await?;
                    }
                    Statement::If {
                        condition,
                        then_branch,
                        else_branch,
                        ..
                    } => {
                        let arm = if condition.evaluate().is_truthy() {
                            then_branch
                        } else {
                            else_branch
                        };
                        frames.push(arm.statements.iter());
                    }
                }
            }
        }

        Ok(steps)
    }

    /// Awaits one capability call, cancelling it once the deadline passes.
    async fn call<F>(&self, node: NodeId, started: Instant, call: F) -> Result<(), ExecutionError>
    where
        F: Future<Output = Result<(), CapabilityError>>,
    {
        let result = match self.remaining(started)? {
            None => Some(call.await),
            Some(remaining) => {
                smol::future::or(async { Some(call.await) }, async {
                    Timer::after(remaining).await;
                    None
                })
                .await
            }
        };
        match result {
            Some(result) => result.map_err(|source| ExecutionError::Capability { node, source })?,
            None => return Err(self.deadline_exceeded()),
        }
        // The call may have finished after the deadline without yielding.
        self.remaining(started).map(|_| ())
    }

    /// Time left before the deadline, `None` when there is no deadline.
    fn remaining(&self, started: Instant) -> Result<Option<Duration>, ExecutionError> {
        match self.limits.deadline {
            None => Ok(None),
            Some(deadline) => deadline
                .checked_sub(started.elapsed())
                .filter(|left| !left.is_zero())
                .map(Some)
                .ok_or_else(|| self.deadline_exceeded()),
        }
    }

    fn deadline_exceeded(&self) -> ExecutionError {
        let millis = self.limits.deadline.map_or(0, |d| d.as_millis());
        ExecutionError::DeadlineExceeded(millis)
    }

    fn check_budget(&self, steps: u64, started: Instant) -> Result<(), ExecutionError> {
        if steps > self.limits.max_steps {
            return Err(ExecutionError::StepLimitExceeded(self.limits.max_steps));
        }
        self.remaining(started).map(|_| ())
    }
}
