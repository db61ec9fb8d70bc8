//! Sampler distribution check.
//!
//! Usage:
//!   ./uniform_check                       # chi-square over uniform(93), 1M draws
//!   ./uniform_check --max 62 --trials 5000000
//!   ./uniform_check --stream              # raw uniform(256) bytes to stdout
//!
//! Pipe the stream to test suites:
//!   ./uniform_check --stream | dieharder -a -g 200
//!   ./uniform_check --stream | RNG_test stdin -tlmax 1TB

use std::io::{self, Write};
use std::num::NonZeroU32;

use passkit::rand::{Sampler, rejection_limit};

const DEFAULT_MAX: u32 = 93;
const DEFAULT_TRIALS: u64 = 1_000_000;

struct Args {
    max: NonZeroU32,
    trials: u64,
    stream: bool,
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        max: NonZeroU32::new(DEFAULT_MAX).ok_or("zero default")?,
        trials: DEFAULT_TRIALS,
        stream: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--stream" => parsed.stream = true,
            "--max" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --max")?;
                parsed.max = value
                    .parse::<u32>()
                    .ok()
                    .and_then(NonZeroU32::new)
                    .ok_or_else(|| format!("Invalid max: {value}"))?;
            }
            "--trials" => {
                i += 1;
                let value = args.get(i).ok_or("Missing value for --trials")?;
                parsed.trials = value
                    .parse()
                    .map_err(|_| format!("Invalid trials: {value}"))?;
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(parsed)
}

fn print_usage() {
    eprintln!("Usage: uniform_check [OPTIONS]");
    eprintln!();
    eprintln!("Checks that the password sampler draws uniformly from [0, max).");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --max <N>      Modulus to sample (default: {DEFAULT_MAX})");
    eprintln!("  --trials <N>   Number of draws (default: {DEFAULT_TRIALS})");
    eprintln!("  --stream       Write uniform(256) bytes to stdout forever");
    eprintln!("  -h, --help     Show this help");
}

fn stream(sampler: &mut Sampler) -> Result<(), String> {
    let byte = NonZeroU32::new(256).ok_or("zero modulus")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut buf = [0u8; 8192];

    loop {
        for slot in buf.iter_mut() {
            *slot = sampler.uniform(byte).map_err(|e| e.to_string())? as u8;
        }
        if out.write_all(&buf).is_err() {
            return Ok(());
        }
    }
}

fn check(sampler: &mut Sampler, max: NonZeroU32, trials: u64) -> Result<bool, String> {
    let mut counts = vec![0u64; max.get() as usize];
    for _ in 0..trials {
        let value = sampler.uniform(max).map_err(|e| e.to_string())?;
        let slot = counts
            .get_mut(value as usize)
            .ok_or_else(|| format!("draw {value} outside [0, {max})"))?;
        *slot += 1;
    }

    let expected = trials as f64 / max.get() as f64;
    let chi_square: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();
    let df = (max.get() - 1) as f64;
    // Roughly the 99.9th percentile for large df.
    let critical = df + 3.1 * (2.0 * df).sqrt();

    let min = counts.iter().min().copied().unwrap_or(0);
    let most = counts.iter().max().copied().unwrap_or(0);
    println!("source:       {}", sampler.source_name());
    println!("modulus:      {max}");
    println!("reject limit: {}", rejection_limit(max));
    println!("trials:       {trials}");
    println!("expected:     {expected:.1} per value (min {min}, max {most})");
    println!("chi-square:   {chi_square:.2} (df {df}, critical {critical:.2})");

    Ok(max.get() == 1 || chi_square <= critical)
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            std::process::exit(2);
        }
    };

    let mut sampler = Sampler::os();
    let outcome = if args.stream {
        stream(&mut sampler).map(|()| true)
    } else {
        check(&mut sampler, args.max, args.trials)
    };

    match outcome {
        Ok(true) => {
            if !args.stream {
                println!("result:       uniform");
            }
        }
        Ok(false) => {
            println!("result:       NOT uniform");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
