//! Convert command
//!
//! Usage: netpol convert [FILE] --to <internal|v1> [--peer] [--output <FILE>]

use clap::{Args, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use netpol_api::convert::{
    convert_peer_to_internal, convert_peer_to_v1, convert_policy_to_internal,
    convert_policy_to_v1, Scope,
};
use netpol_api::{internal, v1};
use netpol_core::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// v1 document in, canonical internal document out
    Internal,
    /// Internal document in, v1 document out
    V1,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input JSON file (default: stdin)
    pub input: Option<PathBuf>,

    /// Target schema version
    #[arg(long, value_enum)]
    pub to: Direction,

    /// Treat the input as a bare peer instead of a whole policy
    #[arg(long)]
    pub peer: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute convert command
pub fn execute(args: ConvertArgs) -> Result<()> {
    let input = read_input(args.input.as_ref())?;
    let scope = Scope::new();

    let rendered = match (args.to, args.peer) {
        (Direction::Internal, true) => {
            let peer: v1::NetworkPolicyPeer = serde_json::from_str(&input)?;
            serde_json::to_string_pretty(&convert_peer_to_internal(&peer, &scope)?)?
        }
        (Direction::Internal, false) => {
            let policy: v1::NetworkPolicy = serde_json::from_str(&input)?;
            serde_json::to_string_pretty(&convert_policy_to_internal(&policy, &scope)?)?
        }
        (Direction::V1, true) => {
            let peer: internal::NetworkPolicyPeer = serde_json::from_str(&input)?;
            serde_json::to_string_pretty(&convert_peer_to_v1(&peer, &scope)?)?
        }
        (Direction::V1, false) => {
            let policy: internal::NetworkPolicy = serde_json::from_str(&input)?;
            serde_json::to_string_pretty(&convert_policy_to_v1(&policy, &scope)?)?
        }
    };

    write_output(args.output.as_ref(), &rendered)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, rendered: &str) -> Result<()> {
    if let Some(output_path) = path {
        std::fs::write(output_path, rendered)?;
    } else {
        println!("{}", rendered);
    }
    Ok(())
}
