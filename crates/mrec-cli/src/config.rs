//! Building a [`MatchConfig`] from a JSON file and command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use mrec_ingest::LoadOptions;
use mrec_model::{AcceptancePolicy, FieldMapping, KeyFilter, MatchConfig};

use crate::cli::{MatchArgs, PolicyArg};

/// Reads a JSON match configuration.
pub fn load_config_file(path: &Path) -> Result<MatchConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Combines `--config` with the remaining flags; flags win where given.
pub fn build_config(args: &MatchArgs) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = load_config_file(path)?;
            if !args.map.is_empty() {
                config.mapping = FieldMapping::new(args.map.clone())?;
            }
            config
        }
        None => {
            if args.map.is_empty() {
                bail!("no field mapping given; pass --map BASE=TARGET or --config FILE");
            }
            MatchConfig::new(FieldMapping::new(args.map.clone())?)
        }
    };

    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(policy) = policy_from_args(args)? {
        config.policy = policy;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = Some(threshold);
    }
    if let Some(key) = &args.key {
        config.key_filter = Some(KeyFilter::from(key.clone()));
    }
    if !args.feedback.is_empty() {
        config.feedback_fields = args
            .feedback
            .iter()
            .map(|field| field.trim().to_string())
            .filter(|field| !field.is_empty())
            .collect();
    }
    if args.parallel {
        config.parallel = true;
    }
    if args.no_index {
        config.use_index = false;
    }
    if args.no_diffs {
        config.track_diffs = false;
    }
    if let Some(mode) = args.output_mode {
        config.output.mode = mode.into();
    }
    if let Some(prefix) = &args.feedback_prefix {
        config.output.feedback_prefix.clone_from(prefix);
    }
    if let Some(marker) = &args.absent_marker {
        config.output.absent_marker.clone_from(marker);
    }
    if let Some(separator) = &args.separator {
        config.output.separator.clone_from(separator);
    }

    config.validate()?;
    Ok(config)
}

fn policy_from_args(args: &MatchArgs) -> Result<Option<AcceptancePolicy>> {
    let policy = match (args.policy, args.top_n) {
        (None, None) => None,
        (Some(PolicyArg::BestOnly), None) => Some(AcceptancePolicy::BestOnly),
        (Some(PolicyArg::AllQualifying), None) => Some(AcceptancePolicy::AllQualifying),
        (Some(PolicyArg::TopN), None) => bail!("--policy top-n needs --top-n N"),
        (None | Some(PolicyArg::TopN), Some(n)) => Some(AcceptancePolicy::TopN { n }),
        (Some(_), Some(_)) => bail!("--top-n only applies to --policy top-n"),
    };
    Ok(policy)
}

/// Loader settings shared by both input files.
pub fn load_options(delimiter: char, infer_types: bool) -> Result<LoadOptions> {
    let Ok(delimiter) = u8::try_from(delimiter) else {
        bail!("delimiter '{delimiter}' must be a single ASCII character");
    };
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character");
    }
    Ok(LoadOptions {
        delimiter,
        infer_types,
        ..LoadOptions::default()
    })
}
