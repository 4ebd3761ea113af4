//! Bid request commands.

use std::fs;
use std::path::Path;

use prebid_mobile_common::configuration::AdUnitConfiguration;
use prebid_mobile_common::sdk::SdkContext;
use prebid_mobile_common::url_builder::{BidPathBuilder, UrlBuilder, UrlPathBuilder};

use crate::config::load_and_merge_config;
use crate::error::CliError;

/// Load an ad unit configuration. Files ending in `.json` are parsed as JSON,
/// everything else as TOML.
pub(crate) fn load_ad_unit(file: &Path) -> Result<AdUnitConfiguration, CliError> {
    let content = fs::read_to_string(file)?;
    let is_json = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config: AdUnitConfiguration = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    if config.ad_formats.is_empty() {
        return Err(CliError::AdUnit(format!(
            "{} does not declare any ad formats",
            file.display()
        )));
    }
    Ok(config)
}

/// Assemble the bid request for an ad unit and write it to `output` or stdout.
pub fn build(
    settings_file: &Path,
    ad_unit_file: &Path,
    pretty: bool,
    no_browser: bool,
    output: Option<&Path>,
    verbose: bool,
) -> Result<(), CliError> {
    let (settings, _) = load_and_merge_config(settings_file, verbose)?;
    let ad_unit = load_ad_unit(ad_unit_file)?;
    let sdk = SdkContext::from_settings(&settings);

    let components = UrlBuilder::for_bid_request(&ad_unit, &sdk, !no_browser)
        .build()
        .map_err(|e| CliError::Request(format!("{e:?}")))?;

    log::info!("Auction endpoint: {}", components.url);

    let body = if pretty {
        serde_json::to_string_pretty(&components.body)?
    } else {
        serde_json::to_string(&components.body)?
    };

    match output {
        Some(path) => {
            fs::write(path, format!("{body}\n"))?;
            if verbose {
                log::info!("Wrote bid request to {}", path.display());
            }
        }
        None => println!("{body}"),
    }
    Ok(())
}

/// Print the auction endpoint configured in a settings file.
pub fn url(settings_file: &Path, verbose: bool) -> Result<(), CliError> {
    let (settings, _) = load_and_merge_config(settings_file, verbose)?;
    println!(
        "{}",
        BidPathBuilder::new(settings.server.host).build_url_path(None)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("should write file");
        path
    }

    fn settings(dir: &TempDir) -> PathBuf {
        write(
            dir,
            "settings.toml",
            "[server]\naccount_id = \"test-account\"\n\n[targeting]\ncontext_keywords = [\"sports\"]\n",
        )
    }

    #[test]
    fn test_load_toml_ad_unit() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write(
            &dir,
            "banner.toml",
            r#"
config_id = "banner-config"
ad_formats = ["banner"]
sizes = [{ width = 320, height = 50 }]
"#,
        );

        let config = load_ad_unit(&path).expect("should load ad unit");
        assert_eq!(config.config_id.as_deref(), Some("banner-config"));
        assert_eq!(config.sizes.len(), 1);
    }

    #[test]
    fn test_load_json_ad_unit() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write(
            &dir,
            "video.json",
            r#"{"config_id": "video-config", "ad_formats": ["vast"], "rewarded": true}"#,
        );

        let config = load_ad_unit(&path).expect("should load ad unit");
        assert!(config.rewarded);
    }

    #[test]
    fn test_ad_unit_without_formats_is_rejected() {
        let dir = TempDir::new().expect("should create temp dir");
        let path = write(&dir, "empty.toml", "config_id = \"empty\"\n");

        assert!(matches!(load_ad_unit(&path), Err(CliError::AdUnit(_))));
    }

    #[test]
    fn test_build_writes_request_file() {
        let dir = TempDir::new().expect("should create temp dir");
        let settings_path = settings(&dir);
        let ad_unit_path = write(
            &dir,
            "banner.toml",
            "config_id = \"banner-config\"\nad_formats = [\"banner\"]\n",
        );
        let output = dir.path().join("request.json");

        build(&settings_path, &ad_unit_path, true, false, Some(&output), false)
            .expect("should build request");

        let request: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&output).expect("should read output"),
        )
        .expect("output should be json");
        assert_eq!(request["app"]["publisher"]["id"], "test-account");
        assert_eq!(request["app"]["keywords"], "sports");
        assert_eq!(request["imp"][0]["clickbrowser"], 0);
        assert_eq!(
            request["imp"][0]["ext"]["prebid"]["storedrequest"]["id"],
            "banner-config"
        );
    }

    #[test]
    fn test_build_without_browser_activity() {
        let dir = TempDir::new().expect("should create temp dir");
        let settings_path = settings(&dir);
        let ad_unit_path = write(
            &dir,
            "banner.toml",
            "config_id = \"banner-config\"\nad_formats = [\"banner\"]\n",
        );
        let output = dir.path().join("request.json");

        build(&settings_path, &ad_unit_path, false, true, Some(&output), false)
            .expect("should build request");

        let request: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&output).expect("should read output"),
        )
        .expect("output should be json");
        assert_eq!(request["imp"][0]["clickbrowser"], 1);
    }

    #[test]
    fn test_url_command() {
        let dir = TempDir::new().expect("should create temp dir");
        let settings_path = settings(&dir);

        assert!(url(&settings_path, false).is_ok());
    }
}
