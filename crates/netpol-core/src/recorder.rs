//! Change-cause recorder
//!
//! Records a "reason for change" annotation on API objects and can produce
//! a merge patch reflecting only that annotation delta. Three recording
//! policies exist, selected by the `--record` flag state:
//!
//! - `--record=true`: always write the annotation
//! - flag omitted: only rewrite an annotation that already exists
//! - `--record=false` explicitly: never touch the annotation

use std::collections::BTreeMap;
use std::path::Path;

use netpol_api::Annotated;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::patch::create_merge_patch;

/// The annotation recording a guess at "why" something was changed
pub const CHANGE_CAUSE_ANNOTATION: &str = "netpol.io/change-cause";

/// Flag state associated with the "--record" operation
///
/// `record` and `update` are `Option`s so callers can distinguish an
/// explicitly-set flag from an omitted one; `to_recorder` applies the
/// defaults (record off, update allowed).
#[derive(Debug, Clone, Default)]
pub struct RecordFlags {
    pub record: Option<bool>,
    pub update: Option<bool>,

    change_cause: String,
}

impl RecordFlags {
    /// RecordFlags with the standard defaults set
    pub fn new() -> Self {
        Self {
            record: Some(false),
            update: Some(true),
            change_cause: String::new(),
        }
    }

    /// Finish the flag state after argument parsing, before use
    ///
    /// Captures the reconstructed command line as the change cause. An
    /// explicit `--record=false` from the user also disables updating an
    /// existing annotation.
    pub fn complete(&mut self, change_cause: impl Into<String>, record_flag_given: bool) {
        self.change_cause = change_cause.into();

        if record_flag_given && self.record == Some(false) {
            self.update = Some(false);
        }
    }

    /// Set the change cause directly, bypassing command-line reconstruction
    pub fn complete_with_change_cause(&mut self, cause: impl Into<String>) {
        self.change_cause = cause.into();
    }

    /// Build the recorder matching the current flag state
    ///
    /// Returns `Recorder::ChangeCause` if recording was requested,
    /// `Recorder::ChangeCauseUpdate` if the flag was omitted, and
    /// `Recorder::Noop` if recording was explicitly declined.
    pub fn to_recorder(&self) -> Recorder {
        let should_record = self.record.unwrap_or(false);
        let should_update = self.update.unwrap_or(true);

        if !should_record {
            if !should_update {
                return Recorder::Noop;
            }
            return Recorder::ChangeCauseUpdate {
                change_cause: self.change_cause.clone(),
            };
        }

        Recorder::ChangeCause {
            change_cause: self.change_cause.clone(),
        }
    }
}

/// Records why an object was changed in an annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorder {
    /// Does nothing, so calling code doesn't have to switch on it
    Noop,
    /// Always writes the change-cause annotation
    ChangeCause { change_cause: String },
    /// Rewrites the change-cause annotation only if one already exists
    ChangeCauseUpdate { change_cause: String },
}

impl Recorder {
    /// Apply this recorder's annotation policy to `obj`
    pub fn record<T: Annotated>(&self, obj: &mut T) {
        match self {
            Recorder::Noop => {}
            Recorder::ChangeCause { change_cause } => {
                debug!(cause = %change_cause, "recording change-cause annotation");
                obj.annotations_mut()
                    .insert(CHANGE_CAUSE_ANNOTATION.to_string(), change_cause.clone());
            }
            Recorder::ChangeCauseUpdate { change_cause } => {
                if annotation_exists(obj.annotations()) {
                    debug!(cause = %change_cause, "updating existing change-cause annotation");
                    obj.annotations_mut()
                        .insert(CHANGE_CAUSE_ANNOTATION.to_string(), change_cause.clone());
                }
            }
        }
    }

    /// Produce a merge patch updating the recording annotation
    ///
    /// Records on a copy of `obj` and diffs the serialized forms, so the
    /// patch contains only the annotation delta. Returns `None` when this
    /// recorder's policy declines to record on the given object.
    ///
    /// # Errors
    /// * `Serialization` - if either object form fails to serialize
    pub fn make_record_merge_patch<T>(&self, obj: &T) -> Result<Option<Vec<u8>>>
    where
        T: Annotated + Serialize + Clone,
    {
        match self {
            Recorder::Noop => return Ok(None),
            Recorder::ChangeCauseUpdate { .. } if !annotation_exists(obj.annotations()) => {
                return Ok(None);
            }
            _ => {}
        }

        // Record on a copy so we don't touch the original
        let mut updated = obj.clone();
        self.record(&mut updated);

        let old_data = serde_json::to_value(obj)?;
        let new_data = serde_json::to_value(&updated)?;

        let patch = create_merge_patch(&old_data, &new_data);
        Ok(Some(serde_json::to_vec(&patch)?))
    }
}

fn annotation_exists(annotations: &BTreeMap<String, String>) -> bool {
    annotations.contains_key(CHANGE_CAUSE_ANNOTATION)
}

/// Reconstruct the invoking command line for use as a change cause
///
/// Produces `<binary base name> <positional args> --<flag>=<value>...`.
/// Values of flags named in `classified` are replaced with `CLASSIFIED`
/// so secrets never end up in annotations.
pub fn change_cause_from_args<I, S>(args: I, classified: &[&str]) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut iter = args.into_iter();
    let Some(bin) = iter.next() else {
        return String::new();
    };

    let base = Path::new(bin.as_ref())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut positionals = String::new();
    let mut flags = String::new();

    for arg in iter {
        let arg = arg.as_ref();
        if let Some(rest) = arg.strip_prefix("--") {
            let (name, value) = match rest.split_once('=') {
                Some((n, v)) => (n, Some(v)),
                None => (rest, None),
            };
            flags.push_str(" --");
            flags.push_str(name);
            if let Some(value) = value {
                flags.push('=');
                if classified.contains(&name) {
                    flags.push_str("CLASSIFIED");
                } else {
                    flags.push_str(value);
                }
            }
        } else {
            positionals.push(' ');
            positionals.push_str(arg);
        }
    }

    format!("{base}{positionals}{flags}")
}
