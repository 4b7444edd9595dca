// config.rs - Configuration file support

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    // Input
    pub alignment: Option<String>,
    pub model: Option<String>,
    pub format: Option<String>,

    // Decision
    pub threshold: Option<f64>,

    // Outputs
    pub output: Option<String>,
    pub features_out: Option<String>,
    pub scores_out: Option<String>,
    pub filtered_out: Option<String>,
    pub output_format: Option<String>,

    // Performance
    pub threads: Option<usize>,

    // Flags
    pub dry_run: Option<bool>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config = Self::from_toml_str(&content)
            .map_err(|e| format!("{} ('{}')", e, path.display()))?;

        log::info!("Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# alifilter.toml - Configuration file for alifilter
# Command line arguments will override these settings

# =============================================================================
# INPUT
# =============================================================================

# Alignment to filter (relaxed PHYLIP or aligned FASTA)
alignment = "/path/to/alignment.phy"

# Pretrained JSON model (omit to keep every column)
model = "/path/to/alifilter.validated.json"

# Alignment format: auto, phylip, fasta
format = "auto"

# =============================================================================
# DECISION
# =============================================================================

# Override the threshold stored in the model (0.0-1.0)
# threshold = 0.5

# =============================================================================
# OUTPUTS
# =============================================================================

# Mask file (omit to print the mask to stdout)
output = "alignment.mask"

# Per-column features and scores (TSV)
# features_out = "features.tsv"
# scores_out = "scores.tsv"

# Filtered alignment and its format: auto, phylip, fasta
# filtered_out = "alignment.filtered.phy"
# output_format = "auto"

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# FLAGS
# =============================================================================

# Validate inputs without computation (dry run)
dry_run = false
"#
        .to_string()
    }
}
