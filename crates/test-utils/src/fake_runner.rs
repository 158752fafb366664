use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use specregen::errors::Result;
use specregen::exec::{CommandOutput, CommandRunner};

/// A fake command runner that:
/// - records every command it is asked to run
/// - tracks how many commands are in flight at once (high-water mark)
/// - fabricates a non-zero exit code for commands containing a
///   configured substring, and a spawn error for another set.
#[derive(Default)]
pub struct FakeRunner {
    commands: Arc<Mutex<Vec<String>>>,
    fail_on: Vec<String>,
    error_on: Vec<String>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands containing `substring` exit with code 1.
    pub fn fail_on(mut self, substring: &str) -> Self {
        self.fail_on.push(substring.to_string());
        self
    }

    /// Commands containing `substring` fail to spawn entirely.
    pub fn error_on(mut self, substring: &str) -> Self {
        self.error_on.push(substring.to_string());
        self
    }

    /// Hold each command in flight for `delay`, so concurrency is
    /// observable.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every command run so far, in completion order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("commands lock poisoned").clone()
    }

    /// Highest number of commands that were ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl CommandRunner for FakeRunner {
    fn run<'a>(
        &'a self,
        command: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput>> + Send + 'a>> {
        Box::pin(async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.commands
                .lock()
                .expect("commands lock poisoned")
                .push(command.to_string());
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.error_on.iter().any(|s| command.contains(s.as_str())) {
                return Err(anyhow::anyhow!("fake spawn failure for `{command}`").into());
            }

            let exit_code = if self.fail_on.iter().any(|s| command.contains(s.as_str())) {
                1
            } else {
                0
            };

            Ok(CommandOutput {
                exit_code,
                stdout: String::new(),
                stderr: String::new(),
            })
        })
    }
}
