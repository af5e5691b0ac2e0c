use anyhow::{anyhow, ensure, Result};
use clap::Parser;

use melodier_core::{melodies, Melody};

/// Plays a built-in melody through the non-blocking sequencer, printing every
/// tone instead of sounding it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct SimArgs {
    /// Name of the built-in melody to play
    #[arg(short, long, default_value = "twinkle")]
    pub melody: String,

    /// Number of passes over the melody (0 loops forever)
    #[arg(short, long, default_value_t = 1)]
    pub repeats: u16,

    /// Interval between sequencer updates in milliseconds
    #[arg(short, long, default_value_t = 10)]
    pub tick_ms: u64,

    /// Stop the simulation after this many milliseconds (0 runs until the
    /// melody ends)
    #[arg(short, long, default_value_t = 0)]
    pub duration_ms: u64,

    /// Pause playback at this point in milliseconds
    #[arg(long)]
    pub pause_at_ms: Option<u64>,

    /// Resume playback at this point in milliseconds
    #[arg(long, requires = "pause_at_ms")]
    pub resume_at_ms: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// List the built-in melodies and exit
    #[arg(short, long)]
    pub list: bool,
}

impl SimArgs {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_ms > 0, "tick interval must be at least 1 ms");

        if let (Some(pause_at), Some(resume_at)) = (self.pause_at_ms, self.resume_at_ms) {
            ensure!(
                resume_at > pause_at,
                "resume time ({} ms) must come after pause time ({} ms)",
                resume_at,
                pause_at
            );
        }

        ensure!(
            self.repeats > 0 || self.duration_ms > 0,
            "looping forever (--repeats 0) needs a --duration-ms cut-off"
        );

        ensure!(
            self.pause_at_ms.is_none() || self.resume_at_ms.is_some() || self.duration_ms > 0,
            "pausing without resuming needs a --duration-ms cut-off"
        );

        Ok(())
    }
}

pub fn find_melody(name: &str) -> Result<Melody<'static>> {
    melodies::find(name).map(Melody::new).ok_or_else(|| {
        anyhow!(
            "unknown melody `{}` (available: {})",
            name,
            melody_names().join(", ")
        )
    })
}

pub fn melody_names() -> Vec<&'static str> {
    melodies::ALL.iter().map(|(name, _)| *name).collect()
}
