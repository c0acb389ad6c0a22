use std::{fs, process};

use clap::Parser;
use sythin::{DEFAULT_DEFINITION, DEFAULT_SAMPLE_RATE, evaluable_definitions, live, pitch::parse_note, run};

/// sythin renders waveforms described as functions of frequency and time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells sythin to read the program from a file instead of the argument.
    #[arg(short, long)]
    file: bool,

    /// Prints the definitions that can be rendered and exits.
    #[arg(short, long)]
    list: bool,

    /// The definition to render.
    #[arg(short, long, default_value = DEFAULT_DEFINITION)]
    definition: String,

    /// Frequency passed to the definition, in hertz.
    #[arg(long, default_value_t = 440.0, conflicts_with = "note")]
    frequency: f64,

    /// Note name to take the frequency from, such as `A4` or `C#3`.
    #[arg(short, long)]
    note: Option<String>,

    /// Length of the rendered signal, in seconds.
    #[arg(short, long, default_value_t = 1.0)]
    seconds: f64,

    /// Samples per second.
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Number of worker threads used for rendering.
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    contents: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if args.list {
        match live::load(&script) {
            Ok((program, _)) => {
                for name in evaluable_definitions(&program) {
                    println!("{name}");
                }
            },
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            },
        }
        return;
    }

    let frequency = match &args.note {
        Some(note) => parse_note(note).unwrap_or_else(|| {
                                          eprintln!("'{note}' is not a note name such as A4 or C#3.");
                                          process::exit(1);
                                      }),
        None => args.frequency,
    };

    match run(&script,
              &args.definition,
              frequency,
              args.seconds,
              args.sample_rate,
              args.threads)
    {
        Ok(samples) => {
            for sample in samples {
                println!("{sample}");
            }
        },
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        },
    }
}
