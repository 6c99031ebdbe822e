//! Loading generation tuning overrides from TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use dungeon_core::GenerationTuning;

/// Missing keys keep their defaults. The result is validated before it is returned.
pub fn load(path: &Path) -> Result<GenerationTuning> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tuning file: {}", path.display()))?;
    parse(&raw).with_context(|| format!("Invalid tuning file: {}", path.display()))
}

pub fn load_or_default(path: Option<&Path>) -> Result<GenerationTuning> {
    match path {
        Some(path) => load(path),
        None => Ok(GenerationTuning::default()),
    }
}

pub fn parse(raw: &str) -> Result<GenerationTuning> {
    let tuning: GenerationTuning = toml::from_str(raw).context("Failed to parse tuning TOML")?;
    tuning.validate()?;
    Ok(tuning)
}

pub fn default_toml() -> Result<String> {
    toml::to_string_pretty(&GenerationTuning::default()).context("Failed to serialize default tuning")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "[caves]\nmin_stair_separation = 20\n\n[bsp]\nmax_dead_ends = 0").expect("write");

        let tuning = load(file.path()).expect("valid tuning");
        assert_eq!(tuning.caves.min_stair_separation, 20);
        assert_eq!(tuning.bsp.max_dead_ends, 0);
        assert_eq!(tuning.bsp.min_leaf, GenerationTuning::default().bsp.min_leaf);
    }

    #[test]
    fn default_toml_parses_back_to_defaults() {
        let raw = default_toml().expect("serializable");
        assert_eq!(parse(&raw).expect("parses"), GenerationTuning::default());
    }

    #[test]
    fn invalid_values_are_reported() {
        let error = parse("[bsp]\ndead_end_chance = 3.0").expect_err("out of range");
        assert!(format!("{error:#}").contains("dead_end_chance"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = load(Path::new("/nonexistent/tuning.toml")).expect_err("missing");
        assert!(format!("{error:#}").contains("/nonexistent/tuning.toml"));
    }
}
