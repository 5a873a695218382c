//! Password Generation CLI
//!
//! Command-line front end for the password generator. Passwords are
//! written to stdout, one per line; diagnostics go to stderr.

use clap::Parser;
use passgen::{
    analysis::{SelfTest, UniformityThresholds},
    config::{FileConfig, Symbols},
    PasswordGenerator, RandomBytes, UnbiasedSelector,
};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "passgen", version, about = "Generate unbiased random passwords")]
struct Cli {
    /// TOML configuration file; flags override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Password length.
    #[arg(short, long)]
    length: Option<usize>,

    /// Number of passwords to generate.
    #[arg(short, long)]
    count: Option<usize>,

    /// Include digits.
    #[arg(short, long, overrides_with = "no_numbers")]
    numbers: bool,

    /// Leave out digits.
    #[arg(long)]
    no_numbers: bool,

    /// Include the default symbol set.
    #[arg(short, long, overrides_with = "no_symbols")]
    symbols: bool,

    /// Leave out symbols.
    #[arg(long, conflicts_with = "symbol_set")]
    no_symbols: bool,

    /// Include an explicit symbol set instead of the default one.
    #[arg(long, value_name = "CHARS", conflicts_with = "symbols")]
    symbol_set: Option<String>,

    /// Include uppercase letters.
    #[arg(long, overrides_with = "no_uppercase")]
    uppercase: bool,

    /// Leave out uppercase letters.
    #[arg(long)]
    no_uppercase: bool,

    /// Include lowercase letters.
    #[arg(long, overrides_with = "no_lowercase")]
    lowercase: bool,

    /// Leave out lowercase letters.
    #[arg(long)]
    no_lowercase: bool,

    /// Characters to remove from the pool.
    #[arg(short, long, value_name = "CHARS")]
    exclude: Option<String>,

    /// Remove look-alike characters (i l L I | ` o O 0).
    #[arg(long, overrides_with = "no_exclude_similar")]
    exclude_similar: bool,

    /// Keep look-alike characters.
    #[arg(long)]
    no_exclude_similar: bool,

    /// Require one character from each enabled class.
    #[arg(long, overrides_with = "no_strict")]
    strict: bool,

    /// Do not require every enabled class.
    #[arg(long)]
    no_strict: bool,

    /// Worker threads for bulk generation.
    #[arg(short, long)]
    workers: Option<NonZeroUsize>,

    /// Check selector uniformity instead of generating passwords.
    #[arg(long)]
    self_test: bool,

    /// Draws per bin for the self-test.
    #[arg(long, default_value_t = 1_000)]
    draws: u64,
}

impl Cli {
    /// Applies command-line overrides on top of file configuration.
    fn apply(&self, config: &mut FileConfig) {
        let options = &mut config.generator;
        if let Some(length) = self.length {
            options.length = length;
        }
        if let Some(numbers) = toggle(self.numbers, self.no_numbers) {
            options.numbers = numbers;
        }
        match toggle(self.symbols, self.no_symbols) {
            Some(true) => options.symbols = Symbols::Default,
            Some(false) => options.symbols = Symbols::Disabled,
            None => {}
        }
        if let Some(set) = &self.symbol_set {
            options.symbols = Symbols::Custom(set.clone());
        }
        if let Some(uppercase) = toggle(self.uppercase, self.no_uppercase) {
            options.uppercase = uppercase;
        }
        if let Some(lowercase) = toggle(self.lowercase, self.no_lowercase) {
            options.lowercase = lowercase;
        }
        if let Some(exclude) = &self.exclude {
            options.exclude = exclude.clone();
        }
        if let Some(similar) = toggle(self.exclude_similar, self.no_exclude_similar) {
            options.exclude_similar_characters = similar;
        }
        if let Some(strict) = toggle(self.strict, self.no_strict) {
            options.strict = strict;
        }

        if let Some(count) = self.count {
            config.output.count = count;
        }
        if let Some(workers) = self.workers {
            config.output.workers = workers.get();
        }
    }
}

/// Resolves a `--flag`/`--no-flag` pair; `None` keeps the file value.
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.self_test {
        run_self_test(cli.draws);
        return;
    }

    let mut config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    cli.apply(&mut config);

    let mut generator = match PasswordGenerator::new(config.generator) {
        Ok(generator) => generator,
        Err(e) => {
            error!("Invalid options: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let workers = NonZeroUsize::new(config.output.workers).unwrap_or(NonZeroUsize::MIN);
    let passwords = generator.generate_parallel(config.output.count, workers);

    for password in &passwords {
        println!("{}", password);
    }

    info!(
        "Generated {} password(s) from {} candidate(s)",
        passwords.len(),
        generator.candidates_drawn()
    );
}

fn run_self_test(samples_per_bin: u64) {
    info!("passgen v{} selector self-test", passgen::VERSION);

    let mut selector = UnbiasedSelector::new(RandomBytes::from_os_entropy());
    let report = SelfTest::new(UniformityThresholds::default())
        .with_samples_per_bin(samples_per_bin)
        .run(&mut selector);

    for result in &report.results {
        let status = match &result.violation {
            None => "ok".to_owned(),
            Some(violation) => format!("FAIL ({})", violation),
        };
        println!(
            "range {:>3}: chi-square {:>8.2} over {:>7} draws  {}",
            result.max, result.test.chi_square, result.test.samples, status
        );
    }
    println!("rejected samples: {}", report.rejections);

    if !report.passed() {
        std::process::exit(1);
    }
}
