//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use pdf_harvest::{DEFAULT_OUTPUT_DIR, HarvestConfig, MAX_CONCURRENCY};
use pdf_harvest::download::constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};

use crate::cli::Args;

/// Upper bound for the whole-request timeout, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Upper bound for the connect timeout, in seconds.
pub const MAX_CONNECT_TIMEOUT_SECS: u64 = 300;

/// File configuration for harvest defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default output directory for documents.
    pub output_dir: Option<PathBuf>,
    /// Index pages to scan when none are given on the command line.
    pub index_urls: Option<Vec<String>>,
    /// Default concurrency (same range as CLI).
    pub concurrency: Option<usize>,
    /// Whole-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// File receiving the concatenated index HTML.
    pub save_index: Option<PathBuf>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(concurrency) = self.concurrency
            && !(1..=MAX_CONCURRENCY).contains(&concurrency)
        {
            bail!(
                "Invalid config value for `concurrency`: {concurrency}. Expected range: 1..={MAX_CONCURRENCY}"
            );
        }
        validate_secs("timeout_secs", self.timeout_secs, MAX_TIMEOUT_SECS)?;
        validate_secs(
            "connect_timeout_secs",
            self.connect_timeout_secs,
            MAX_CONNECT_TIMEOUT_SECS,
        )?;
        if let Some(urls) = &self.index_urls
            && urls.is_empty()
        {
            bail!("Invalid config value for `index_urls`: expected at least one URL");
        }
        Ok(())
    }
}

fn validate_secs(field: &str, value: Option<u64>, max: u64) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=max).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..={max}");
    }
    Ok(())
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/pdf-harvest/config.toml`
/// 2. `$HOME/.config/pdf-harvest/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("pdf-harvest")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pdf-harvest")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the file config for this run.
///
/// An explicit path must exist. The default path is optional.
pub fn load_file_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = explicit {
        return read_file_config(path).map(Some);
    }

    let Some(path) = resolve_default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    read_file_config(&path).map(Some)
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

/// Merges CLI arguments over file config over built-in defaults.
///
/// Index URLs given on the command line replace the file's list.
#[must_use]
pub fn resolve_harvest_config(args: &Args, file: Option<&FileConfig>) -> HarvestConfig {
    let file = file.cloned().unwrap_or_default();

    let index_urls = if args.index_urls.is_empty() {
        file.index_urls.unwrap_or_default()
    } else {
        args.index_urls.clone()
    };

    HarvestConfig {
        index_urls,
        output_dir: args
            .output_dir
            .clone()
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        concurrency: args
            .concurrency
            .map(usize::from)
            .or(file.concurrency)
            .unwrap_or(pdf_harvest::DEFAULT_CONCURRENCY),
        connect_timeout_secs: args
            .connect_timeout
            .or(file.connect_timeout_secs)
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        request_timeout_secs: args
            .timeout
            .or(file.timeout_secs)
            .unwrap_or(REQUEST_TIMEOUT_SECS),
        save_index: args.save_index.clone().or(file.save_index),
    }
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        let line_no = line_index + 1;

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "output_dir" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `output_dir` value on line {line_no}"))?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "index_urls" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `index_urls` value on line {line_no}"))?;
                cfg.index_urls = Some(
                    parsed
                        .split(',')
                        .map(str::trim)
                        .filter(|url| !url.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "concurrency" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `concurrency` value on line {line_no}"))?;
                let n = usize::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("concurrency out of range for usize"))?;
                cfg.concurrency = Some(n);
            }
            "timeout_secs" => {
                let parsed = parse_integer_u64(value)
                    .with_context(|| format!("Invalid `timeout_secs` value on line {line_no}"))?;
                cfg.timeout_secs = Some(parsed);
            }
            "connect_timeout_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `connect_timeout_secs` value on line {line_no}")
                })?;
                cfg.connect_timeout_secs = Some(parsed);
            }
            "save_index" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `save_index` value on line {line_no}"))?;
                cfg.save_index = Some(PathBuf::from(parsed));
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use clap::Parser;
    use tempfile::TempDir;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["pdf-harvest"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_parse_config_full_file() {
        let raw = r#"
            # harvest defaults
            output_dir = "/data/sds"
            index_urls = "https://a.example/docs, https://b.example/list"
            concurrency = 4   # keep it gentle
            timeout_secs = 120
            connect_timeout_secs = 10
            save_index = "index.html"
        "#;
        let cfg = parse_config_str(raw).unwrap();
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/data/sds")));
        assert_eq!(
            cfg.index_urls,
            Some(vec![
                "https://a.example/docs".to_string(),
                "https://b.example/list".to_string()
            ])
        );
        assert_eq!(cfg.concurrency, Some(4));
        assert_eq!(cfg.timeout_secs, Some(120));
        assert_eq!(cfg.connect_timeout_secs, Some(10));
        assert_eq!(cfg.save_index, Some(PathBuf::from("index.html")));
    }

    #[test]
    fn test_parse_config_hash_inside_string_is_kept() {
        let cfg = parse_config_str(r#"index_urls = "https://a.example/list#top""#).unwrap();
        assert_eq!(
            cfg.index_urls,
            Some(vec!["https://a.example/list#top".to_string()])
        );
    }

    #[test]
    fn test_parse_config_empty_is_default() {
        assert_eq!(parse_config_str("\n# nothing\n").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_parse_config_unknown_key_rejected() {
        let err = parse_config_str("rate_limit = 10").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_missing_equals_rejected() {
        let err = parse_config_str("\noutput_dir").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_parse_config_unquoted_string_rejected() {
        assert!(parse_config_str("output_dir = PDFs").is_err());
    }

    #[test]
    fn test_parse_config_out_of_range_values_rejected() {
        assert!(parse_config_str("concurrency = 0").is_err());
        assert!(parse_config_str("concurrency = 33").is_err());
        assert!(parse_config_str("timeout_secs = 0").is_err());
        assert!(parse_config_str("timeout_secs = 3601").is_err());
        assert!(parse_config_str("connect_timeout_secs = 301").is_err());
        assert!(parse_config_str("concurrency = -1").is_err());
        assert!(parse_config_str(r#"index_urls = " , ""#).is_err());
    }

    #[test]
    fn test_load_file_config_explicit_missing_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        assert!(load_file_config(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_file_config_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "concurrency = 2\n").unwrap();

        let cfg = load_file_config(Some(&path)).unwrap().unwrap();
        assert_eq!(cfg.concurrency, Some(2));
    }

    #[test]
    fn test_resolve_defaults_without_file() {
        let config = resolve_harvest_config(&args(&["https://a.example/"]), None);
        assert_eq!(config.index_urls, vec!["https://a.example/".to_string()]);
        assert_eq!(config.output_dir, PathBuf::from("PDFs"));
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.request_timeout_secs, 900);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.save_index, None);
    }

    #[test]
    fn test_resolve_cli_overrides_file() {
        let file = FileConfig {
            output_dir: Some(PathBuf::from("from-file")),
            index_urls: Some(vec!["https://file.example/".to_string()]),
            concurrency: Some(8),
            timeout_secs: Some(60),
            connect_timeout_secs: None,
            save_index: Some(PathBuf::from("snap.html")),
        };
        let config = resolve_harvest_config(
            &args(&["-o", "from-cli", "-c", "2", "https://cli.example/"]),
            Some(&file),
        );
        assert_eq!(config.index_urls, vec!["https://cli.example/".to_string()]);
        assert_eq!(config.output_dir, PathBuf::from("from-cli"));
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.connect_timeout_secs, 30);
        assert_eq!(config.save_index, Some(PathBuf::from("snap.html")));
    }

    #[test]
    fn test_resolve_file_index_urls_used_when_cli_has_none() {
        let file = FileConfig {
            index_urls: Some(vec!["https://file.example/".to_string()]),
            ..FileConfig::default()
        };
        let config = resolve_harvest_config(&args(&[]), Some(&file));
        assert_eq!(config.index_urls, vec!["https://file.example/".to_string()]);
    }
}
