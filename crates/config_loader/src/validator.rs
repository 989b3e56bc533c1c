//! Configuration validation
//!
//! Rules:
//! - segmentation parameters drive a terminating segmentation
//! - sink names non-empty and unique
//! - sink queue capacity >= 1
//! - file sinks name an output path and a known format
//! - input format known (explicit or from the extension)

use std::collections::HashSet;

use contracts::{
    ContractError, FeatureBlueprint, InputFormat, SinkType, SummaryFileFormat,
};
use ::validator::Validate;

/// Validate a FeatureBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &FeatureBlueprint) -> Result<(), ContractError> {
    blueprint.to_pipeline_config().check()?;
    validate_sinks(blueprint)?;
    validate_sink_names(blueprint)?;
    validate_file_sinks(blueprint)?;
    validate_input(blueprint)?;
    Ok(())
}

/// Per-sink field rules
fn validate_sinks(blueprint: &FeatureBlueprint) -> Result<(), ContractError> {
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        sink.validate()
            .map_err(|errors| ContractError::from_validation(&format!("sinks[{idx}]"), &errors))?;
    }
    Ok(())
}

/// Sink name uniqueness
fn validate_sink_names(blueprint: &FeatureBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for sink in &blueprint.sinks {
        if !seen.insert(sink.name.as_str()) {
            return Err(ContractError::invalid_configuration(
                format!("sinks[name={}]", sink.name),
                "duplicate sink name",
            ));
        }
    }
    Ok(())
}

/// File sink parameters
fn validate_file_sinks(blueprint: &FeatureBlueprint) -> Result<(), ContractError> {
    for sink in blueprint
        .sinks
        .iter()
        .filter(|s| s.sink_type == SinkType::File)
    {
        match sink.param("path") {
            Some(path) if !path.trim().is_empty() => {}
            _ => {
                return Err(ContractError::invalid_configuration(
                    format!("sinks[{}].params.path", sink.name),
                    "file sink requires an output path",
                ));
            }
        }

        if let Some(format) = sink.param("format") {
            if SummaryFileFormat::from_param(format).is_none() {
                return Err(ContractError::invalid_configuration(
                    format!("sinks[{}].params.format", sink.name),
                    format!("unknown file format '{format}', expected jsonl or csv"),
                ));
            }
        }
    }
    Ok(())
}

/// Input path/format consistency
fn validate_input(blueprint: &FeatureBlueprint) -> Result<(), ContractError> {
    let Some(input) = &blueprint.input else {
        return Ok(());
    };

    if let (Some(path), None) = (&input.path, input.format) {
        if InputFormat::from_path(path).is_none() {
            return Err(ContractError::invalid_configuration(
                "input.format",
                format!(
                    "cannot infer input format from '{}'; set input.format to csv or json",
                    path.display()
                ),
            ));
        }
    }
    Ok(())
}
