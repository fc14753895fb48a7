use crate::domain::model::OutputFormat;
use crate::utils::error::{ExpandError, Result};
use std::str::FromStr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(ExpandError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if OutputFormat::from_str(format).is_err() {
            return Err(ExpandError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::NAMES.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// File names only; no separators, so output stays inside the output directory.
pub fn validate_basename(field_name: &str, basename: &str) -> Result<()> {
    validate_non_empty_string(field_name, basename)?;
    if basename.contains(['/', '\\']) || basename == "." || basename == ".." {
        return Err(ExpandError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: basename.to_string(),
            reason: "Basename must be a plain file name".to_string(),
        });
    }
    Ok(())
}
