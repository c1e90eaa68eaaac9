use clap::{Parser, ValueEnum};
use log::error;
use rand::RngCore;
use rand::rngs::OsRng;
use safe_prime_params::{
    DEFAULT_Q_BITS, DomainParameterGenerator, PrimeGenerator, Result, Rounds, SearchStrategy,
    seeded_rng,
};
use std::process::ExitCode;

/// CLI arguments parsed via clap.
#[derive(Parser, Debug)]
#[command(
    name = "safe-prime-params",
    about = "Generate safe-prime domain parameters (p, q, g) or standalone probable primes"
)]
struct Args {
    /// Number of parameter sets (or primes) to print.
    #[arg(short = 'n', long = "count", default_value_t = 10)]
    count: usize,

    /// Bit width of q (or of each prime with --prime).
    #[arg(short = 'b', long = "bits", default_value_t = DEFAULT_Q_BITS)]
    bits: u64,

    /// Miller–Rabin rounds; defaults to the bit length of the tested number.
    #[arg(long = "rounds", value_parser = parse_rounds)]
    rounds: Option<usize>,

    /// How to pick the next candidate after a composite.
    #[arg(long = "strategy", value_enum, default_value_t = Strategy::Decrement)]
    strategy: Strategy,

    /// Seed a deterministic generator instead of using OS entropy.
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Print standalone primes of --bits width instead of (p, q, g).
    #[arg(long = "prime")]
    prime: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    Decrement,
    StepByTwo,
    Resample,
}

impl From<Strategy> for SearchStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Decrement => SearchStrategy::Decrement,
            Strategy::StepByTwo => SearchStrategy::StepByTwo,
            Strategy::Resample => SearchStrategy::Resample,
        }
    }
}

/// Parse a Miller–Rabin round count, rejecting zero.
fn parse_rounds(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("rounds must be at least 1".to_string()),
        Ok(k) => Ok(k),
        Err(err) => Err(err.to_string()),
    }
}

/// Build the prime generator described by the command-line flags.
fn prime_generator(args: &Args) -> PrimeGenerator {
    let rounds = args.rounds.map_or(Rounds::BitLength, Rounds::Fixed);
    PrimeGenerator::new()
        .with_rounds(rounds)
        .with_strategy(args.strategy.into())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut rng: Box<dyn RngCore> = match args.seed {
        Some(seed) => Box::new(seeded_rng(seed)),
        None => Box::new(OsRng),
    };
    let primes = prime_generator(args);

    if args.prime {
        for _ in 0..args.count {
            let p = primes.generate(args.bits, rng.as_mut())?;
            println!("{p}");
        }
        return Ok(());
    }

    let generator = DomainParameterGenerator::new(args.bits).with_prime_generator(primes);
    for _ in 0..args.count {
        let params = generator.generate(rng.as_mut())?;
        println!("{params}");
    }
    Ok(())
}
