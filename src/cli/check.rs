//! Check command implementation

use crate::cli::output::ProbeReport;
use crate::cli::CheckArgs;
use crate::config::ProbeConfig;
use crate::health::{
    BODY_CONTAINS, CONNECT_TIMEOUT, HEADERS, READ_TIMEOUT, STATUS_CODE_EQUALS_TO, TIMEOUT,
};
use crate::logging::init_tracing;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &CheckArgs,
) -> Result<ProbeConfig, Box<dyn std::error::Error>> {
    load_config_with_lookup(args, |key| std::env::var(key).ok())
}

/// Load configuration, reading PROBE_* overrides through `lookup`
pub fn load_config_with_lookup<F>(
    args: &CheckArgs,
    lookup: F,
) -> Result<ProbeConfig, Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<String>,
{
    // A missing file at the default path just means defaults
    let mut config = if args.config.exists() {
        ProbeConfig::load(Some(&args.config))?
    } else {
        ProbeConfig::default()
    };

    config = config.with_overrides_from(lookup);

    // Apply CLI overrides (highest priority)
    if let Some(ref url) = args.url {
        config.target.url = url.clone();
    }
    if let Some(status) = args.status {
        config.target.conditions.insert(
            STATUS_CODE_EQUALS_TO.to_string(),
            toml::Value::Integer(i64::from(status)),
        );
    }
    if let Some(ref needle) = args.body_contains {
        config
            .target
            .conditions
            .insert(BODY_CONTAINS.to_string(), toml::Value::String(needle.clone()));
    }
    for (key, value) in [
        (TIMEOUT, args.timeout),
        (CONNECT_TIMEOUT, args.connect_timeout),
        (READ_TIMEOUT, args.read_timeout),
    ] {
        if let Some(seconds) = value {
            config
                .target
                .options
                .insert(key.to_string(), toml::Value::Float(seconds));
        }
    }
    if !args.headers.is_empty() {
        let mut headers = match config.target.options.remove(HEADERS) {
            Some(toml::Value::Table(table)) => table,
            _ => toml::Table::new(),
        };
        for raw in &args.headers {
            let (name, value) = parse_header(raw)?;
            headers.insert(name, toml::Value::String(value));
        }
        config
            .target
            .options
            .insert(HEADERS.to_string(), toml::Value::Table(headers));
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Parse a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("Invalid header '{}': expected 'Name: value'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid header '{}': name is empty", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Handle `probe check` command
pub async fn handle_check(args: &CheckArgs) -> Result<ProbeReport, Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(args)?;
    init_tracing(&config.logging)?;
    config.validate()?;

    let checker = config.target.build_checker()?;
    tracing::info!(url = %checker.endpoint(), "Probing endpoint");

    let outcome = checker.check().await;
    Ok(ProbeReport::new(checker.endpoint(), &outcome))
}
