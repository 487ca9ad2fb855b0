//! WavEdit - Batch WAV Effects Processor

use anyhow::Context;
use clap::Parser;
use std::process;
use wavedit::{init_logging, Args, Config, Session};

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        println!("{}", wavedit::build_info());
        println!();
    }

    let info_only = args.info;
    let config = Config::from_args_and_config(args)?;

    if !config.input_path.is_file() {
        anyhow::bail!("Input file does not exist: {}", config.input_path.display());
    }

    let output_path = config.output_path();
    let mut session = Session::open(&config.input_path, &output_path)
        .with_context(|| format!("Failed to load {}", config.input_path.display()))?;

    if info_only {
        println!("{}", session.buffer().summary());
        return Ok(());
    }

    println!("=== WavEdit ===");
    println!("Input: {}", session.input_path().display());
    println!("Output: {}", session.output_path().display());
    if config.verbose() {
        println!("{}", session.buffer().summary());
    }
    println!("Effects: {}", config.effects.len());
    println!("===============\n");

    for effect in &config.effects {
        print!("Applying {}...", effect.name());
        session.apply(effect).with_context(|| format!("Effect '{}' failed", effect.name()))?;
        println!("Done");
    }

    if let Some(bit_depth) = config.bit_depth() {
        session.set_bit_depth(bit_depth);
    }

    session
        .save()
        .with_context(|| format!("Failed to save {}", session.output_path().display()))?;

    println!("Saved: {}", session.output_path().display());
    Ok(())
}
