//! NES CPU core runner.
//!
//! Loads a cartridge and steps the CPU until a fatal error or the step limit.
//! Usage: nescore [OPTIONS] <ROM>

use std::path::PathBuf;
use std::process::ExitCode;

use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use clap::Parser;
use log::{Level, LevelFilter, Log, Metadata, Record, error, info};

use nescore::{cartridge::cartridge::Cartridge, cpu::cpu::CPU};

#[derive(Parser, Debug)]
#[command(name = "nescore", version, about = "Run an NROM cartridge on the NES CPU core")]
struct Cli {
    /// iNES cartridge image (.nes)
    rom: PathBuf,

    /// Log every executed instruction (nestest-style trace)
    #[arg(long)]
    trace: bool,

    /// Log level when --trace is not given
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Stop after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,

    /// Override the program counter after load, in hex (e.g. C000 for nestest automation)
    #[arg(long, value_parser = parse_hex_u16)]
    entry: Option<u16>,
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches('$');
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|e: log::ParseLevelError| format!("invalid log level '{}': {}", s, e))
}

/// Stderr logger with coloured level labels.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let label = match record.level() {
            Level::Error => Red.bold().paint("ERROR"),
            Level::Warn => Yellow.bold().paint("WARN "),
            Level::Info => Green.bold().paint("INFO "),
            Level::Debug => Blue.bold().paint("DEBUG"),
            Level::Trace => Cyan.paint("TRACE"),
        };
        eprintln!("{} {}", label, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.trace {
        LevelFilter::Trace
    } else {
        cli.log_level
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }

    let result = Cartridge::load(&cli.rom).and_then(CPU::load).and_then(|mut cpu| {
        if let Some(entry) = cli.entry {
            cpu.pc = entry;
        }
        info!("running {} from ${:04X}", cli.rom.display(), cpu.pc);
        let steps = cpu.run(cli.max_steps);
        if steps.is_err() {
            error!(
                "halted after {} cycles: A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
                cpu.cycles, cpu.a, cpu.x, cpu.y, cpu.status, cpu.sp
            );
        }
        steps
    });

    match result {
        Ok(steps) => {
            info!("stopped after {} instructions", steps);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", Red.bold().paint("fatal:"), err);
            ExitCode::FAILURE
        }
    }
}
