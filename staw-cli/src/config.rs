use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use staw_core::SiteBuilder;
use staw_core::config::SiteConfig;
use std::path::Path;

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StawConfig {
    /// Build configuration
    pub build: BuildConfig,
    /// Site configuration (from staw-core)
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Source directory containing markdown files
    pub source: Option<String>,
    /// Output directory for generated site
    pub output: Option<String>,
    /// Template file
    pub template: Option<String>,
}

/// CLI argument id and the configuration key it overrides.
const CLI_OVERRIDES: [(&str, &str); 6] = [
    ("source", "build.source"),
    ("output", "build.output"),
    ("template", "build.template"),
    ("title", "site.title"),
    ("prefix", "site.prefix"),
    ("css", "site.css"),
];

impl StawConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (STAW_*)
    /// 3. Configuration file
    /// 4. Defaults (lowest priority)
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let mut builder = ConfigBuilder::builder();

        // Configuration file, if present
        if let Some(config_file) = args.try_get_one::<String>("config").unwrap_or(None) {
            let path = Path::new(config_file);
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        // Environment variables with STAW_ prefix
        builder = builder.add_source(
            Environment::with_prefix("STAW")
                .prefix_separator("_")
                .separator("__"), // Use double underscore for nested keys
        );

        // Override with CLI arguments that are defined for this command
        for (arg, key) in CLI_OVERRIDES {
            if let Some(value) = args.try_get_one::<String>(arg).unwrap_or(None) {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Site builder with every configured value applied; validation happens in `build()`
    pub fn site_builder(&self) -> SiteBuilder {
        let mut builder = SiteBuilder::new().site_config(self.site.clone());

        if let Some(source) = &self.build.source {
            builder = builder.source_dir(source);
        }
        if let Some(output) = &self.build.output {
            builder = builder.output_dir(output);
        }
        if let Some(template) = &self.build.template {
            builder = builder.template(template);
        }

        builder
    }
}

/// Load configuration for the build command
pub fn load_build_config(args: &ArgMatches) -> Result<StawConfig> {
    StawConfig::load(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::build::make_command;
    use staw_core::BuildError;

    #[test]
    fn test_default_config() {
        let config = StawConfig::default();
        assert_eq!(config.build.source, None);
        assert_eq!(config.build.template, None);
        assert_eq!(config.site.title, None);
        assert_eq!(config.site.prefix, "");
    }

    #[test]
    fn test_cli_args_override() {
        let matches = make_command()
            .try_get_matches_from(vec![
                "staw",
                "--in",
                "/custom/source",
                "--output",
                "/custom/output",
                "-t",
                "Custom",
                "-p",
                "/preview",
                "--config",
                "/does/not/exist.toml",
            ])
            .unwrap();

        let config = StawConfig::load(&matches).unwrap();
        assert_eq!(config.build.source.as_deref(), Some("/custom/source"));
        assert_eq!(config.build.output.as_deref(), Some("/custom/output"));
        assert_eq!(config.site.title.as_deref(), Some("Custom"));
        assert_eq!(config.site.prefix, "/preview");
        assert_eq!(config.site.css, None);
    }

    #[test]
    fn test_config_file_is_overridden_by_cli() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_file = temp_dir.path().join("staw.toml");
        std::fs::write(
            &config_file,
            "[build]\nsource = \"file-src\"\ntemplate = \"file.tpl\"\n\n[site]\ntitle = \"From File\"\n",
        )
        .unwrap();

        let matches = make_command()
            .try_get_matches_from(vec![
                "staw",
                "--config",
                config_file.to_str().unwrap(),
                "--title",
                "From CLI",
            ])
            .unwrap();

        let config = StawConfig::load(&matches).unwrap();
        assert_eq!(config.build.source.as_deref(), Some("file-src"));
        assert_eq!(config.build.template.as_deref(), Some("file.tpl"));
        assert_eq!(config.site.title.as_deref(), Some("From CLI"));
    }

    #[test]
    fn test_missing_output_is_reported_by_builder() {
        let temp_dir = tempfile::tempdir().unwrap();
        let template = temp_dir.path().join("page.tpl");
        std::fs::write(&template, "{{ title }}").unwrap();

        let matches = make_command()
            .try_get_matches_from(vec![
                "staw",
                "--tpl",
                template.to_str().unwrap(),
                "--in",
                temp_dir.path().to_str().unwrap(),
                "-t",
                "Site",
                "--config",
                "/does/not/exist.toml",
            ])
            .unwrap();

        let config = StawConfig::load(&matches).unwrap();
        let err = config.site_builder().build().unwrap_err();
        assert!(matches!(err, BuildError::MissingOutputDir));
    }
}
