//! Turning Ctrl-C into a cancelled run.
//!
//! The first interrupt (or `SIGTERM` on Unix) sets the run's
//! [`CancellationToken`]; the running check is marked cancelled and the
//! summary is still printed. A second interrupt exits immediately with
//! [`EXIT_INTERRUPTED`](crate::EXIT_INTERRUPTED).

use std::io;
use std::thread;

use tokio::runtime::Builder;

use crate::check::CancellationToken;
use crate::error::Result;

/// Install the process-wide handler that cancels `token`.
///
/// The signal handlers are registered before this returns, so an interrupt
/// arriving right after is never lost.
///
/// # Errors
/// Returns an error if the signal handlers or the listener thread cannot be
/// set up.
pub fn cancel_on_interrupt(token: CancellationToken) -> Result<()> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    let mut signals = runtime.block_on(async { Signals::register() })?;

    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                signals.recv().await;
                tracing::warn!("Interrupted, cancelling the run");
                token.cancel();

                signals.recv().await;
                tracing::warn!("Interrupted again, exiting");
                std::process::exit(crate::EXIT_INTERRUPTED);
            });
        })?;
    Ok(())
}

#[cfg(unix)]
struct Signals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn recv(&mut self) {
        tokio::select! {
            _ = self.interrupt.recv() => {}
            _ = self.terminate.recv() => {}
        }
    }
}

#[cfg(not(unix))]
struct Signals;

#[cfg(not(unix))]
impl Signals {
    #[allow(clippy::unnecessary_wraps)]
    const fn register() -> io::Result<Self> {
        Ok(Self)
    }

    async fn recv(&mut self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::Command;
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn interrupt_cancels_the_token() {
        let token = CancellationToken::new();
        cancel_on_interrupt(token.clone()).unwrap();

        let status = Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let deadline = Instant::now() + Duration::from_secs(5);
        while !token.is_cancelled() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        assert!(token.is_cancelled());
    }
}
