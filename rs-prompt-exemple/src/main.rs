use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rand::Rng;
use rs_prompt_core::{Generator, PromptRequest};

/// Highest seed the host node offers by default.
const MAX_DEFAULT_SEED: u64 = 30000;

/// Generates one prompt from a vocabulary directory and a set of field directives.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Directory holding one `<category>.json` vocabulary per field
    #[arg(long, default_value = "./data")]
    data: PathBuf,

    /// JSON request file; only the fields in use need to be listed
    #[arg(long)]
    request: Option<PathBuf>,

    /// Seed; random in 0..=30000 when neither a flag nor the request sets one
    #[arg(long)]
    seed: Option<u64>,

    /// Free text placed first, verbatim
    #[arg(long)]
    custom: Option<String>,

    /// Explicit subject
    #[arg(long)]
    subject: Option<String>,

    /// Field override written as `field=value`, e.g. `--set lighting=random`
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,

    /// Print the output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Load all vocabularies from the data directory (.json files)
    let generator = Generator::from_dir(&args.data)?;

    // Start from the request file if any, every field disabled otherwise
    let mut request = match &args.request {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => PromptRequest::default(),
    };
    let seed_given = args.seed.is_some()
        || args.request.is_some()
        || args.overrides.iter().any(|assignment| assignment.trim_start().starts_with("seed="));

    for assignment in &args.overrides {
        request.apply(assignment)?;
    }
    if let Some(custom) = args.custom {
        request.custom = custom;
    }
    if let Some(subject) = args.subject {
        request.subject = subject;
    }
    if let Some(seed) = args.seed {
        request.seed = seed;
    } else if !seed_given {
        request.seed = rand::rng().random_range(0..=MAX_DEFAULT_SEED);
        log::info!("Using random seed {}", request.seed);
    }

    let output = generator.generate(&request)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("prompt: {}", output.prompt);
        println!("seed:   {}", output.seed);
        println!("t5:     {}", output.t5);
        println!("clip_l: {}", output.clip_l);
        println!("clip_g: {}", output.clip_g);
    }

    Ok(())
}
