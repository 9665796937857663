//! Config command handlers

use crate::cli::ConfigInitArgs;
use std::fs;

/// Annotated example configuration written by `probe config init`
pub const EXAMPLE_CONFIG: &str = include_str!("../../probe.example.toml");

/// Handle `probe config init` command
///
/// Refuses to replace an existing file unless `--force` is given and returns
/// the message to print.
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<String, Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    Ok(format!(
        "✓ Configuration file created: {}\n  Set target.url, then run `probe check -c {}`.",
        args.output.display(),
        args.output.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProbeConfig;

    fn init_args(dir: &tempfile::TempDir, force: bool) -> ConfigInitArgs {
        ConfigInitArgs {
            output: dir.path().join("probe.toml"),
            force,
        }
    }

    #[test]
    fn test_config_init_writes_loadable_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = init_args(&temp_dir, false);

        let message = handle_config_init(&args).unwrap();
        assert!(message.contains("probe.toml"));

        let config = ProbeConfig::load(Some(&args.output)).unwrap();
        assert_eq!(config.target.url, "http://localhost:8080/health");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_init_keeps_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = init_args(&temp_dir, false);
        fs::write(&args.output, "existing").unwrap();

        assert!(handle_config_init(&args).is_err());
        assert_eq!(fs::read_to_string(&args.output).unwrap(), "existing");
    }

    #[test]
    fn test_config_init_force_replaces_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = init_args(&temp_dir, true);
        fs::write(&args.output, "old content").unwrap();

        handle_config_init(&args).unwrap();
        assert_eq!(fs::read_to_string(&args.output).unwrap(), EXAMPLE_CONFIG);
    }
}
