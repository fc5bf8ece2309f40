//! `occupancy` CLI — read out shared free/busy intervals from a schedule file.
//!
//! ## Usage
//!
//! ```sh
//! # Per-hour transition minutes of the merged day (stdin → stdout)
//! cat day.json | occupancy intervals
//!
//! # Same, with free time as the starting assumption, as JSON
//! occupancy intervals -i day.json --free --json
//!
//! # Contiguous slots, only free ones of at least 45 minutes
//! occupancy slots -i day.json --free-only --min-duration 45
//!
//! # Readout of a single hour mask
//! occupancy readout --hour 9 --bits 0x3FFFFFFF
//!
//! # Same, written to a file
//! occupancy readout --hour 9 --bits 0x3FFFFFFF -o hour9.txt
//! ```
//!
//! Set `OCCUPANCY_LOG=debug` to see merge diagnostics on stderr.

mod logging;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use occupancy_engine::{merge_schedules, DayOccupancy, HourOccupancy, Module, Occupancy, Schedule};
use serde::Deserialize;
use std::io::{self, Read};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "occupancy",
    version,
    about = "Minute-level free/busy readout for shared schedules"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print per-hour transition minutes of the merged day
    Intervals {
        /// Schedule file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Assume busy before 00:00 so transitions mark the start of free time
        #[arg(long)]
        free: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print contiguous free/busy slots of the merged day
    Slots {
        /// Schedule file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Only print free slots
        #[arg(long)]
        free_only: bool,
        /// Drop free slots shorter than this many minutes
        #[arg(long)]
        min_duration: Option<u16>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Read out a single hour mask
    Readout {
        /// Hour of the mask (0-23)
        #[arg(long)]
        hour: u8,
        /// Minute bits, decimal or 0x-prefixed hex (bit 0 = minute 0)
        #[arg(long)]
        bits: String,
        /// State assumed for the minute before minute 0
        #[arg(long, value_enum, default_value_t = PrevState::Free)]
        prev: PrevState,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PrevState {
    Free,
    Busy,
}

impl From<PrevState> for Occupancy {
    fn from(prev: PrevState) -> Self {
        match prev {
            PrevState::Free => Occupancy::Free,
            PrevState::Busy => Occupancy::Busy,
        }
    }
}

/// Input document: everyone's busy time on one date.
#[derive(Deserialize)]
struct ScheduleFile {
    date: NaiveDate,
    /// Teaching week of `date`; lessons are only applied when present.
    #[serde(default)]
    week: Option<u32>,
    #[serde(default)]
    schedules: Vec<Schedule>,
    #[serde(default)]
    modules: Vec<Module>,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Intervals {
            input,
            output,
            free,
            json,
        } => {
            let day = load_day(input.as_deref())?;
            let readout = day.get_intervals(free);
            let rendered = if json {
                serde_json::to_string_pretty(&readout)?
            } else {
                let mut lines: Vec<String> = readout
                    .hours
                    .iter()
                    .map(|h| {
                        let minutes: Vec<String> = h.minutes.iter().map(|m| m.to_string()).collect();
                        format!("{:02}: {}", h.hour, minutes.join(" "))
                    })
                    .collect();
                lines.push(format!("terminal: {}", readout.terminal));
                lines.join("\n") + "\n"
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Slots {
            input,
            output,
            free_only,
            min_duration,
            json,
        } => {
            let day = load_day(input.as_deref())?;
            let min_duration = min_duration.unwrap_or(0);
            let slots: Vec<_> = day
                .get_intervals(false)
                .slots()
                .into_iter()
                .filter(|s| !free_only || s.state == Occupancy::Free)
                .filter(|s| s.state == Occupancy::Busy || s.duration_minutes >= min_duration)
                .collect();
            let rendered = if json {
                serde_json::to_string_pretty(&slots)?
            } else {
                slots.iter().map(|s| format!("{s}\n")).collect()
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Readout {
            hour,
            bits,
            prev,
            output,
        } => {
            let bits = parse_bits(&bits)?;
            let mask = HourOccupancy::from_bits(hour, bits)
                .with_context(|| format!("Invalid hour mask for hour {}", hour))?;
            let (minutes, terminal) = mask.readout(prev.into());
            let minutes: Vec<String> = minutes.iter().map(|m| m.to_string()).collect();
            let rendered = format!("transitions: {}\nterminal: {}\n", minutes.join(" "), terminal);
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Read a schedule file and fold every schedule and lesson into one day.
fn load_day(path: Option<&str>) -> Result<DayOccupancy> {
    let raw = read_input(path)?;
    let file: ScheduleFile = serde_json::from_str(&raw).context("Failed to parse schedule file")?;

    let mut day = merge_schedules(file.date, &file.schedules)
        .context("Failed to merge schedules")?;

    match file.week {
        Some(week) => {
            for module in &file.modules {
                let applied = day
                    .insert_lessons(&module.lessons, week)
                    .with_context(|| format!("Invalid lesson in module {}", module.code))?;
                debug!(module = %module.code, applied, "applied module lessons");
            }
        }
        None if !file.modules.is_empty() => {
            warn!("schedule file lists modules but no week; lessons ignored");
        }
        None => {}
    }

    Ok(day)
}

/// Parse decimal or `0x`-prefixed hexadecimal minute bits.
fn parse_bits(raw: &str) -> Result<u64> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.with_context(|| format!("Invalid minute bits: '{}'", raw))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
