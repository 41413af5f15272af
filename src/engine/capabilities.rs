use crate::ast::Value;
use crate::error::CapabilityError;
use smol::Timer;
use std::time::Duration;

/// The primitive operations generated programs may call.
///
/// Calls are awaited by the engine, so an implementation may suspend (for example
/// to write to a channel or sleep on a timer). New operations are introduced in
/// lockstep with the node kinds that emit them.
#[allow(async_fn_in_trait)]
pub trait Capabilities {
    async fn print(&mut self, value: &Value) -> Result<(), CapabilityError>;

    /// Suspends for `millis` milliseconds. The default returns immediately.
    async fn delay(&mut self, millis: f64) -> Result<(), CapabilityError> {
        let _ = millis;
        Ok(())
    }
}

/// Records every call, optionally failing a chosen `print` call.
#[derive(Debug, Default, Clone)]
pub struct RecordingCapabilities {
    pub printed: Vec<Value>,
    pub delays: Vec<f64>,
    fail_at: Option<(usize, String)>,
}

impl RecordingCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the `index`-th print call (zero based) fail with `message`.
    pub fn failing_at(index: usize, message: impl Into<String>) -> Self {
        Self {
            fail_at: Some((index, message.into())),
            ..Self::default()
        }
    }

    /// Printed values rendered the way a console would show them.
    pub fn lines(&self) -> Vec<String> {
        self.printed.iter().map(ToString::to_string).collect()
    }
}

impl Capabilities for RecordingCapabilities {
    async fn print(&mut self, value: &Value) -> Result<(), CapabilityError> {
        if let Some((index, message)) = &self.fail_at {
            if *index == self.printed.len() {
                return Err(CapabilityError::Failed(message.clone()));
            }
        }
        self.printed.push(value.clone());
        Ok(())
    }

    async fn delay(&mut self, millis: f64) -> Result<(), CapabilityError> {
        self.delays.push(millis);
        Ok(())
    }
}

/// Prints each value on its own line to stdout and sleeps on a timer for delays.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutCapabilities;

impl Capabilities for StdoutCapabilities {
    async fn print(&mut self, value: &Value) -> Result<(), CapabilityError> {
        println!("{}", value);
        Ok(())
    }

    /// Zero, negative and `NaN` durations return at once. A duration too large to
    /// represent is an error rather than a panic.
    async fn delay(&mut self, millis: f64) -> Result<(), CapabilityError> {
        if millis.is_nan() || millis <= 0.0 {
            return Ok(());
        }
        let duration = Duration::try_from_secs_f64(millis / 1000.0)
            .map_err(|_| CapabilityError::Failed(format!("Invalid delay of {:e}ms", millis)))?;
        Timer::after(duration).await;
        Ok(())
    }
}
