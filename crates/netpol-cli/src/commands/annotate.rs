//! Annotate command
//!
//! Usage: netpol annotate [FILE] [--record[=<bool>]] [--change-cause <TEXT>] [--patch]
//!
//! Applies the change-cause recording policy to a v1 policy document.
//! Without `--record` an existing change-cause annotation is updated;
//! `--record=true` always writes one; `--record=false` leaves the document
//! untouched.

use clap::Args;
use std::io::Read;
use std::path::PathBuf;

use netpol_api::v1;
use netpol_core::recorder::{change_cause_from_args, RecordFlags};
use netpol_core::{NetpolError, Result};

/// Flags whose values are scrubbed from recorded command lines
const CLASSIFIED_FLAGS: &[&str] = &["token"];

#[derive(Debug, Args)]
pub struct AnnotateArgs {
    /// Input JSON file (default: stdin)
    pub input: Option<PathBuf>,

    /// Record the current command in the change-cause annotation. If set
    /// to false, do not record. If not set, default to updating an
    /// existing annotation value only if one already exists.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub record: Option<bool>,

    /// Use this text as the change cause instead of the command line
    #[arg(long)]
    pub change_cause: Option<String>,

    /// Print the RFC 7386 merge patch instead of the annotated document
    #[arg(long)]
    pub patch: bool,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute annotate command
pub fn execute(args: AnnotateArgs) -> Result<()> {
    let mut flags = RecordFlags::new();
    flags.record = args.record.or(flags.record);

    let cause = match &args.change_cause {
        Some(cause) => cause.clone(),
        None => change_cause_from_args(std::env::args(), CLASSIFIED_FLAGS),
    };
    flags.complete(cause, args.record.is_some());

    let recorder = flags.to_recorder();

    let input = read_input(args.input.as_ref())?;
    let mut policy: v1::NetworkPolicy = serde_json::from_str(&input)?;

    let rendered = if args.patch {
        match recorder.make_record_merge_patch(&policy)? {
            Some(patch) => {
                String::from_utf8(patch).map_err(|e| NetpolError::InvalidObject {
                    reason: format!("merge patch is not valid UTF-8: {e}"),
                })?
            }
            None => "{}".to_string(),
        }
    } else {
        recorder.record(&mut policy);
        serde_json::to_string_pretty(&policy)?
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
    } else {
        println!("{}", rendered);
    }

    Ok(())
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
