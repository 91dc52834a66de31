//! Print the contents of a DS1 stamp
//!
//! Run with: cargo run --bin ds1-dump -- path/to/stamp.ds1 [--json]

use std::path::PathBuf;

use clap::Parser;
use ds1_stamp::{DecodeOptions, Ds1};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(about = "Decode a DS1 map stamp and print its contents")]
struct Args {
    /// Stamp file to decode
    file: PathBuf,

    /// Print the whole document as JSON
    #[arg(long)]
    json: bool,

    /// JSON file with decode limits
    #[arg(long, value_name = "FILE", conflicts_with = "strict")]
    limits: Option<PathBuf>,

    /// Use the built-in conservative limits
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let opts = match (&args.limits, args.strict) {
        (Some(path), _) => DecodeOptions::from_json(&std::fs::read_to_string(path)?)?,
        (None, true) => DecodeOptions::strict(),
        (None, false) => DecodeOptions::default(),
    };

    let data = std::fs::read(&args.file)?;
    info!(path = %args.file.display(), bytes = data.len(), "decoding");
    let ds1 = Ds1::parse_with(&data, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ds1)?);
    } else {
        print_summary(&ds1);
    }
    Ok(())
}

fn print_summary(ds1: &Ds1) {
    let h = &ds1.header;
    println!("version:            {}", h.version);
    println!("size:               {}x{} tiles", h.width, h.height);
    println!("act:                {}", h.act);
    println!("substitution type:  {}", h.substitution_type);
    println!(
        "layers:             {} wall, {} floor, {} shadow, {} substitution",
        h.num_walls, h.num_floors, h.num_shadow_layers, h.num_substitution_layers
    );
    println!("files:              {}", h.files.len());
    for file in &h.files {
        println!("  {file}");
    }
    println!("objects:            {}", ds1.objects.len());
    println!("substitution groups: {}", ds1.substitution_groups.len());
    println!("npcs:               {}", ds1.npcs().count());
    for npc in ds1.npcs() {
        let points = npc.paths.as_ref().map_or(0, Vec::len);
        println!("  id {} at ({}, {}): {} waypoints", npc.id, npc.x, npc.y, points);
    }
}
