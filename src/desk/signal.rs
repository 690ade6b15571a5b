use log::{debug, warn};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

pub const NOTIFY_TITLE: &str = "Timer Complete!";
pub const NOTIFY_BODY: &str = "Your timer has finished.";

/// Receives the countdown completion signal.
pub trait CompletionSignal {
    fn timer_finished(&mut self);
}

/// Rings the terminal bell and, when allowed, raises a desktop notification
/// through `notify-send`.
#[derive(Debug, Clone)]
pub struct DesktopSignal {
    notifications: bool,
}

impl DesktopSignal {
    /// Checks once whether desktop notifications can be shown. A missing
    /// `notify-send` silently disables them.
    pub fn probe(enabled: bool) -> Self {
        let notifications = enabled && notify_send_available();
        debug!("desktop notifications enabled={}", notifications);
        Self { notifications }
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications
    }

    fn ring_bell(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }

    fn notify(&self) -> io::Result<()> {
        let mut cmd = Command::new("notify-send");
        cmd.arg("--app-name=focusdesk")
            .arg(NOTIFY_TITLE)
            .arg(NOTIFY_BODY);
        spawn_detached(&mut cmd)
    }
}

/// Starts `cmd` without waiting for it. The child is reaped on a helper
/// thread so the event loop never blocks on a slow notification daemon.
fn spawn_detached(cmd: &mut Command) -> io::Result<()> {
    let mut child = cmd.stdout(Stdio::null()).stderr(Stdio::null()).spawn()?;
    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => debug!("notifier exited with {}", status),
        Ok(_) => {}
        Err(e) => debug!("failed to wait for notifier: {}", e),
    });
    Ok(())
}

impl CompletionSignal for DesktopSignal {
    fn timer_finished(&mut self) {
        if let Err(e) = self.ring_bell() {
            warn!("failed to ring terminal bell: {}", e);
        }
        if self.notifications {
            if let Err(e) = self.notify() {
                warn!("failed to send desktop notification: {}", e);
            }
        }
    }
}

fn notify_send_available() -> bool {
    Command::new("notify-send")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Signal that does nothing; used when the app runs without a terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSignal;

impl CompletionSignal for SilentSignal {
    fn timer_finished(&mut self) {}
}
