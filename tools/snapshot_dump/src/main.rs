use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use voxmech_machines::{decode_snapshot, ComposterSnapshot, HarvesterSnapshot};

#[derive(Parser, Debug)]
#[command(author, version, about = "Machine snapshot inspection utility for voxmech", long_about = None)]
struct Args {
    /// Snapshot blob to decode
    input: PathBuf,

    /// Which machine the blob belongs to
    #[arg(short, long, value_enum, default_value = "harvester")]
    kind: Kind,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Harvester,
    Composter,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let bytes = fs::read(&args.input)
        .with_context(|| format!("failed to read snapshot from {}", args.input.display()))?;

    let json = match args.kind {
        Kind::Harvester => to_json::<HarvesterSnapshot>(&bytes, args.pretty)?,
        Kind::Composter => to_json::<ComposterSnapshot>(&bytes, args.pretty)?,
    };
    println!("{json}");
    Ok(())
}

fn to_json<T>(bytes: &[u8], pretty: bool) -> Result<String>
where
    T: serde::de::DeserializeOwned + serde::Serialize,
{
    let snapshot: T = decode_snapshot(bytes)?;
    let json = if pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    Ok(json)
}
