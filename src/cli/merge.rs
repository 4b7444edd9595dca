// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input
        if self.alignment.is_none() {
            self.alignment = config.alignment;
        }
        if self.model.is_none() {
            self.model = config.model;
        }
        if self.format == "auto" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }

        // Decision
        if self.threshold.is_none() {
            self.threshold = config.threshold;
        }

        // Outputs
        if self.output.is_none() {
            self.output = config.output;
        }
        if self.features_out.is_none() {
            self.features_out = config.features_out;
        }
        if self.scores_out.is_none() {
            self.scores_out = config.scores_out;
        }
        if self.filtered_out.is_none() {
            self.filtered_out = config.filtered_out;
        }
        if self.output_format == "auto" {
            if let Some(format) = config.output_format {
                self.output_format = format;
            }
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        if !self.dry_run && config.dry_run.unwrap_or(false) {
            self.dry_run = true;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
