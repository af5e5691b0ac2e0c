use std::{thread, time::Duration};

use anyhow::Result;
use clap::Parser;
use melodier_core::{Clock, Sequencer};

use melodier_sim::{
    clock::SystemClock,
    config::{find_melody, melody_names, SimArgs},
    console::ConsoleTone,
};

/// How often the stand-in for the host's other periodic work runs
const HEARTBEAT_MS: u64 = 1_000;

fn main() -> Result<()> {
    /* Parse the CLI arguments */

    let args = SimArgs::parse();

    if args.list {
        for name in melody_names() {
            println!("{}", name);
        }

        return Ok(());
    }

    args.validate()?;

    let melody = find_melody(&args.melody)?;

    println!();
    println!("Melody");
    println!("================");
    println!("Name: {}", args.melody);
    println!("Notes: {}", melody.len());
    println!("Pass Length: {} ms", melody.total_duration_ms());
    match args.repeats {
        0 => println!("Repeats: forever"),
        repeats => println!("Repeats: {}", repeats),
    }
    println!("Tick: {} ms", args.tick_ms);
    println!();

    if args.verbose {
        for (i, note) in melody.notes().iter().enumerate() {
            println!("{:>3}: {:>5} Hz for {:>4} ms", i, note.frequency_hz, note.duration_ms);
        }
        println!();
    }

    /* Run the cooperative loop */

    let clock = SystemClock::new();
    let mut sequencer = Sequencer::new(ConsoleTone::new(clock, args.verbose), clock);

    sequencer.begin();
    sequencer.play(melody, args.repeats);

    let tick = Duration::from_millis(args.tick_ms);
    let mut ticks: u64 = 0;
    let mut last_heartbeat = 0;
    let mut paused = false;
    let mut resumed = false;

    loop {
        sequencer.update();
        ticks += 1;

        let now = sequencer.clock().now_ms();

        if let Some(pause_at) = args.pause_at_ms {
            if !paused && now >= pause_at {
                let note = if sequencer.output().is_sounding() {
                    " (current tone left sounding)"
                } else {
                    ""
                };
                println!("[{:>6} ms] pause{}", now, note);
                sequencer.pause();
                paused = true;
            }
        }

        if let Some(resume_at) = args.resume_at_ms {
            if paused && !resumed && now >= resume_at {
                println!("[{:>6} ms] resume", now);
                sequencer.resume();
                resumed = true;
            }
        }

        // Other periodic work shares the loop with playback
        if now - last_heartbeat >= HEARTBEAT_MS {
            if args.verbose {
                println!(
                    "[{:>6} ms] heartbeat: {} updates, position {}/{}",
                    now,
                    ticks,
                    sequencer.position(),
                    sequencer.melody().map_or(0, |melody| melody.len())
                );
            }

            last_heartbeat = now;
        }

        if !sequencer.is_loaded() {
            break;
        }

        if args.duration_ms > 0 && now >= args.duration_ms {
            println!("[{:>6} ms] stop", now);
            sequencer.stop();
            break;
        }

        thread::sleep(tick);
    }

    let (output, clock) = sequencer.release();

    println!();
    println!("Finished after {} ms", clock.now_ms());
    println!("Updates: {}", ticks);
    println!("Tones: {}", output.tones());
    println!("Silences: {}", output.silences());

    Ok(())
}
