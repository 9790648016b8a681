use std::io::{self, Write};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::emitter::{
    self, DEFAULT_COUNT, DEFAULT_LINGER, DEFAULT_PAUSE, DEFAULT_PAUSE_AT, EmitPlan, WallClock,
};
use crate::logging;

#[derive(Parser, Debug)]
#[command(name = "sequence-emitter")]
#[command(
    about = "Print numbered Nice/What line pairs with a mid-run pause and a trailing linger.",
    long_about = "Stands in for a slow producer. With no arguments it prints 220 lines \
                  (i = 0..109), pauses 1s before i = 50, and waits 3s after the last line \
                  before exiting.",
    version
)]
pub struct Cli {
    #[arg(long, default_value_t = DEFAULT_COUNT, help = "Number of iterations (two lines each).")]
    count: u64,
    #[arg(
        long,
        default_value_t = DEFAULT_PAUSE_AT,
        conflicts_with = "no_pause",
        help = "Iteration preceded by the mid-run pause."
    )]
    pause_at: u64,
    #[arg(long, help = "Skip the mid-run pause.")]
    no_pause: bool,
    #[arg(
        long,
        default_value_t = millis(DEFAULT_PAUSE),
        conflicts_with = "no_pause",
        help = "Mid-run pause in milliseconds."
    )]
    pause_ms: u64,
    #[arg(
        long,
        default_value_t = millis(DEFAULT_LINGER),
        help = "Wait after the last line, in milliseconds."
    )]
    linger_ms: u64,
}

impl Cli {
    pub fn plan(&self) -> EmitPlan {
        EmitPlan {
            count: self.count,
            pause_at: (!self.no_pause).then_some(self.pause_at),
            pause: Duration::from_millis(self.pause_ms),
            linger: Duration::from_millis(self.linger_ms),
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        logging::init_tracing();
        let plan = self.plan();
        let expected = plan.total_lines();
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let summary = emitter::emit_sequence(&plan, &mut out, &mut WallClock)
            .context("failed to write sequence to stdout")?;
        out.flush().context("failed to flush stdout")?;
        info!(
            lines = summary.lines,
            expected,
            pauses = summary.pauses,
            "sequence complete"
        );
        Ok(())
    }
}

const fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_yield_default_plan() {
        let cli = Cli::try_parse_from(["sequence-emitter"]).unwrap();
        assert_eq!(cli.plan(), EmitPlan::default());
    }

    #[test]
    fn overrides_map_onto_plan() {
        let cli = Cli::try_parse_from([
            "sequence-emitter",
            "--count",
            "4",
            "--pause-at",
            "2",
            "--pause-ms",
            "10",
            "--linger-ms",
            "0",
        ])
        .unwrap();
        assert_eq!(
            cli.plan(),
            EmitPlan {
                count: 4,
                pause_at: Some(2),
                pause: Duration::from_millis(10),
                linger: Duration::ZERO,
            }
        );
    }

    #[test]
    fn no_pause_clears_pause_at() {
        let cli = Cli::try_parse_from(["sequence-emitter", "--no-pause"]).unwrap();
        assert_eq!(cli.plan().pause_at, None);
    }

    #[test]
    fn no_pause_conflicts_with_pause_at() {
        let err = Cli::try_parse_from(["sequence-emitter", "--no-pause", "--pause-at", "3"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn no_pause_conflicts_with_pause_ms() {
        let err = Cli::try_parse_from(["sequence-emitter", "--no-pause", "--pause-ms", "5000"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_non_numeric_count() {
        let err = Cli::try_parse_from(["sequence-emitter", "--count", "many"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["sequence-emitter", "extra"]).is_err());
    }
}
