//! Process lifecycle management for child processes
//!
//! Package manager invocations inherit the terminal, so an interactive Ctrl+C
//! already reaches them through the foreground process group. SIGTERM and
//! SIGHUP do not, which is why every spawned child is registered here and
//! terminated before the wizard exits.
//!
//! An interrupt takes the same path as a cancelled prompt: a friendly message
//! and exit code 0. Nothing that already ran is rolled back.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

/// Global registry of child process IDs
static CHILD_REGISTRY: OnceLock<Arc<Mutex<ChildRegistry>>> = OnceLock::new();

/// Set once a termination signal arrives; no new child may start after it
static SHUTDOWN_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Flag raised by the signal handler when the wizard is shutting down
pub fn shutdown_flag() -> Arc<AtomicBool> {
    SHUTDOWN_FLAG
        .get_or_init(|| Arc::new(AtomicBool::new(false)))
        .clone()
}

/// Grace period between SIGTERM and SIGKILL when shutting down
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(3);

/// Registry tracking all spawned child processes
#[derive(Debug, Default)]
pub struct ChildRegistry {
    /// Set of child PIDs currently running
    pids: HashSet<u32>,
    /// Whether cleanup has already been initiated (prevent double-cleanup)
    cleanup_initiated: bool,
}

impl ChildRegistry {
    /// Get or create the global child registry
    pub fn global() -> Arc<Mutex<ChildRegistry>> {
        CHILD_REGISTRY
            .get_or_init(|| Arc::new(Mutex::new(ChildRegistry::default())))
            .clone()
    }

    /// Register a new child process.
    ///
    /// A child that starts after cleanup began is terminated right away
    /// instead of being tracked.
    pub fn register(&mut self, pid: u32) {
        if self.cleanup_initiated {
            tracing::warn!("PID {} started during shutdown, terminating it", pid);
            terminate_pids(&[pid], Duration::ZERO);
            return;
        }
        self.pids.insert(pid);
        tracing::debug!("Registered child process PID {}", pid);
    }

    /// Unregister a child process (called when it exits normally)
    pub fn unregister(&mut self, pid: u32) {
        self.pids.remove(&pid);
        tracing::debug!("Unregistered child process PID {}", pid);
    }

    /// Get count of tracked children
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.pids.len()
    }

    /// Terminate all tracked child processes.
    /// Sends SIGTERM first, waits up to `grace_period`, then SIGKILL.
    pub fn terminate_all(&mut self, grace_period: Duration) {
        if self.cleanup_initiated {
            tracing::debug!("Cleanup already initiated, skipping");
            return;
        }
        self.cleanup_initiated = true;

        if self.pids.is_empty() {
            tracing::debug!("No child processes to terminate");
            return;
        }

        tracing::info!("Terminating {} child process(es)...", self.pids.len());
        let pids: Vec<u32> = self.pids.drain().collect();
        terminate_pids(&pids, grace_period);
    }
}

#[cfg(unix)]
fn terminate_pids(pids: &[u32], grace_period: Duration) {
    use nix::sys::signal::Signal;
    use std::time::Instant;

    for &pid in pids {
        if let Err(e) = send_signal(pid, Signal::SIGTERM) {
            tracing::warn!("Failed to send SIGTERM to PID {}: {}", pid, e);
        }
    }

    let start = Instant::now();
    while start.elapsed() < grace_period {
        if pids.iter().all(|&pid| !is_process_alive(pid)) {
            tracing::info!("All child processes terminated gracefully");
            return;
        }
        std::thread::sleep(Duration::from_millis(100));
    }

    for &pid in pids {
        if is_process_alive(pid) {
            tracing::warn!("Process {} did not terminate, sending SIGKILL", pid);
            let _ = send_signal(pid, Signal::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn terminate_pids(pids: &[u32], _grace_period: Duration) {
    // Console Ctrl+C already reaches every process attached to the console
    tracing::debug!("Leaving {} child process(es) to the console", pids.len());
}

/// Send a signal to a process
#[cfg(unix)]
fn send_signal(pid: u32, signal: nix::sys::signal::Signal) -> Result<(), nix::Error> {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), signal)
}

/// Check if a process is still alive (not dead or zombie)
#[cfg(unix)]
fn is_process_alive(pid: u32) -> bool {
    if nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid as i32), None).is_err() {
        return false;
    }

    // Field 3 of /proc/pid/stat is the state; Z and X are not alive
    if let Ok(stat) = std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        let fields: Vec<&str> = stat.split_whitespace().collect();
        if fields.len() > 2 {
            return !matches!(fields[2], "Z" | "X");
        }
    }

    true
}

/// RAII registration of one running child
///
/// Dropping the guard removes the PID from the global registry, so a child
/// that failed mid-wait is never signalled later.
pub struct ChildGuard {
    pid: u32,
}

impl ChildGuard {
    pub fn register(pid: u32) -> Self {
        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.register(pid);
        }
        Self { pid }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Ok(mut registry) = ChildRegistry::global().lock() {
            registry.unregister(self.pid);
        }
    }
}

/// Exit code used when the wizard is stopped by a signal
///
/// An interrupt is a cancellation and exits cleanly; other termination
/// signals use the conventional 128 + signal number.
#[cfg(unix)]
pub fn exit_code_for_signal(signal: i32) -> i32 {
    if signal == signal_hook::consts::signal::SIGINT {
        0
    } else {
        128 + signal
    }
}

/// Exit code used when the wizard is stopped by Ctrl+C
#[cfg(not(unix))]
pub fn exit_code_for_signal(_signal: i32) -> i32 {
    0
}

fn shutdown(signal: i32, on_interrupt: &(dyn Fn() + Send + Sync)) -> ! {
    shutdown_flag().store(true, Ordering::SeqCst);
    on_interrupt();

    if let Ok(mut registry) = ChildRegistry::global().lock() {
        registry.terminate_all(SHUTDOWN_GRACE);
    }

    std::process::exit(exit_code_for_signal(signal));
}

/// Initialize signal handlers for SIGINT (Ctrl+C), SIGTERM and SIGHUP.
///
/// `on_interrupt` runs once before children are terminated; the wizard uses it
/// to print its cancellation notice. Call this once at program start.
#[cfg(unix)]
pub fn init_signal_handlers<F>(on_interrupt: F) -> std::io::Result<()>
where
    F: Fn() + Send + Sync + 'static,
{
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;

    std::thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let signal_name = match sig {
                SIGINT => "SIGINT",
                SIGTERM => "SIGTERM",
                SIGHUP => "SIGHUP",
                _ => "UNKNOWN",
            };
            tracing::info!("Received {} signal, cleaning up...", signal_name);
            shutdown(sig, &on_interrupt);
        }
    });

    Ok(())
}

/// Initialize the Ctrl+C handler.
#[cfg(not(unix))]
pub fn init_signal_handlers<F>(on_interrupt: F) -> std::io::Result<()>
where
    F: Fn() + Send + Sync + 'static,
{
    ctrlc::set_handler(move || {
        tracing::info!("Received Ctrl+C, cleaning up...");
        shutdown(2, &on_interrupt);
    })
    .map_err(std::io::Error::other)
}
