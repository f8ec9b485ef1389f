use pyexpr::EngineLimits;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LimitsConfigError {
    #[error("read limits config failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("limits config parse failed: {0}")]
    Parse(String),
    #[error("limits config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

pub fn load_limits_config(path: &Path) -> Result<EngineLimits, LimitsConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| LimitsConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let limits: EngineLimits = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(raw.as_str()).map_err(|error| {
            LimitsConfigError::Parse(format!("json decode error: {error}"))
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(raw.as_str()).map_err(|error| {
            LimitsConfigError::Parse(format!("yaml decode error: {error}"))
        })?,
        _ => serde_yaml::from_str(raw.as_str())
            .or_else(|_| serde_json::from_str(raw.as_str()))
            .map_err(|error| LimitsConfigError::Parse(error.to_string()))?,
    };

    let issues = validate_limits(&limits);
    if !issues.is_empty() {
        return Err(LimitsConfigError::Validation(issues));
    }
    log::debug!(
        "loaded limits from {}: max_source_len={} max_depth={}",
        path.display(),
        limits.max_source_len,
        limits.max_depth
    );
    Ok(limits)
}

pub fn validate_limits(limits: &EngineLimits) -> Vec<String> {
    let mut issues = Vec::new();
    if limits.max_source_len == 0 {
        issues.push("max_source_len must be >= 1".to_string());
    }
    if limits.max_depth == 0 {
        issues.push("max_depth must be >= 1".to_string());
    }
    issues
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
