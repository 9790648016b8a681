//! The sequence emitter: numbered `Nice`/`What` line pairs on a writer,
//! one pause before a chosen iteration and a linger after the last line.
//!
//! Every line is flushed as soon as it is written so a reader polling the
//! other end of a pipe sees it without waiting for process exit.

use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, info};

pub const DEFAULT_COUNT: u64 = 110;
pub const DEFAULT_PAUSE_AT: u64 = 50;
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(1);
pub const DEFAULT_LINGER: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EmitPlan {
    pub count: u64,
    pub pause_at: Option<u64>,
    pub pause: Duration,
    pub linger: Duration,
}

impl Default for EmitPlan {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            pause_at: Some(DEFAULT_PAUSE_AT),
            pause: DEFAULT_PAUSE,
            linger: DEFAULT_LINGER,
        }
    }
}

impl EmitPlan {
    /// Lines a complete run writes; saturates for absurd counts.
    pub fn total_lines(&self) -> u64 {
        self.count.saturating_mul(2)
    }

    /// Pause owed before the lines of iteration `i`, if any.
    pub fn pauses_before(&self, i: u64) -> Option<Duration> {
        match self.pause_at {
            Some(at) if at == i && i < self.count => Some(self.pause),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EmitSummary {
    pub lines: u64,
    pub pauses: u32,
}

/// Blocks the emitting thread for a while.
pub trait Pause {
    fn pause(&mut self, duration: Duration);
}

/// Real-time pause on the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl Pause for WallClock {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub fn nice_line(i: u64) -> String {
    format!("Nice: {i}")
}

pub fn what_line(i: u64) -> String {
    format!("What: {}", i / 2)
}

/// Runs `plan` against `out`, stopping at the first write or flush error.
///
/// The linger is only taken once every line made it out.
pub fn emit_sequence<W, P>(
    plan: &EmitPlan,
    out: &mut W,
    pause: &mut P,
) -> io::Result<EmitSummary>
where
    W: Write + ?Sized,
    P: Pause + ?Sized,
{
    let mut summary = EmitSummary::default();
    info!(count = plan.count, pause_at = ?plan.pause_at, "emitter: starting sequence");

    for i in 0..plan.count {
        if let Some(duration) = plan.pauses_before(i) {
            debug!(i, ?duration, "emitter: pausing before iteration");
            pause.pause(duration);
            summary.pauses += 1;
        }
        write_line(out, &nice_line(i))?;
        write_line(out, &what_line(i))?;
        summary.lines += 2;
    }

    debug!(lines = summary.lines, linger = ?plan.linger, "emitter: lingering before exit");
    pause.pause(plan.linger);
    summary.pauses += 1;
    Ok(summary)
}

fn write_line<W: Write + ?Sized>(out: &mut W, line: &str) -> io::Result<()> {
    writeln!(out, "{line}")?;
    out.flush()
}
