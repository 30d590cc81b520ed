//! Progress reporting for the download and ingestion pipeline.
//!
//! The `Ui` trait is threaded through the pipeline so long-running steps can
//! report progress without knowing where that output goes. `ConsoleUi`
//! prints to stdout; `SilentUi` discards everything and is used by tests.

/// Application phases shown while a command runs
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Checking,
    Downloading,
    Loading,
    Linking,
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Checking => write!(f, "Checking cache"),
            Phase::Downloading => write!(f, "Downloading pokedex"),
            Phase::Loading => write!(f, "Loading pokemon"),
            Phase::Linking => write!(f, "Linking evolutions"),
            Phase::Complete => write!(f, "Complete"),
        }
    }
}

/// Trait for UI implementations - allows both console and silent/test modes
pub trait Ui {
    fn set_phase(&mut self, phase: Phase);
    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>);
    fn clear_progress(&mut self);
    fn log(&mut self, message: impl Into<String>);
}

/// Console UI - prints phases and log lines, with sparse progress updates
#[derive(Default)]
pub struct ConsoleUi {
    last_reported: u64,
}

impl ConsoleUi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ui for ConsoleUi {
    fn set_phase(&mut self, phase: Phase) {
        self.last_reported = 0;
        println!("==> {}", phase);
    }

    fn set_progress(&mut self, current: u64, total: u64, label: impl Into<String>) {
        // Print roughly ten updates per operation to keep output readable
        let step = if total > 0 { (total / 10).max(1) } else { 1_000_000 };
        if current == total || current >= self.last_reported + step {
            self.last_reported = current;
            println!("    {}/{} {}", current, total, label.into());
        }
    }

    fn clear_progress(&mut self) {
        self.last_reported = 0;
    }

    fn log(&mut self, message: impl Into<String>) {
        println!("    {}", message.into());
    }
}

/// Silent UI implementation for testing and non-interactive use
#[derive(Default)]
pub struct SilentUi;

impl SilentUi {
    pub fn new() -> Self {
        Self
    }
}

impl Ui for SilentUi {
    fn set_phase(&mut self, _phase: Phase) {}
    fn set_progress(&mut self, _current: u64, _total: u64, _label: impl Into<String>) {}
    fn clear_progress(&mut self) {}
    fn log(&mut self, _message: impl Into<String>) {}
}
