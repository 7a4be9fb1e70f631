//! Fetch, parse and sources commands.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use frabsched_core::EventRecord;
use frabsched_fetch::{FetchConfig, FetchError, ScheduleClient};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::output::{OutputFormat, write_records};

/// Downloads one schedule and prints its records.
pub async fn fetch(
    url: &str,
    group: Option<String>,
    timeout: Duration,
    format: OutputFormat,
) -> ClientResult<()> {
    let config = FetchConfig::from_url(url)?.with_timeout(timeout);
    let group = group.unwrap_or_else(|| config.default_group());

    let records = ScheduleClient::new(config)?.fetch_schedule(&group).await?;
    print(&records, format)
}

/// Parses a local file (or stdin for `-`) and prints its records.
pub fn parse(file: &Path, group: Option<String>, format: OutputFormat) -> ClientResult<()> {
    let records = parse_file(file, group)?;
    print(&records, format)
}

/// Fetches every configured source, printing whatever succeeded.
///
/// A failing source is logged and skipped; the command still fails at the
/// end so scripts notice. `config_path` is the file `config` was loaded from.
pub async fn sources(
    config: &ClientConfig,
    config_path: &Path,
    timeout: Duration,
    format: OutputFormat,
) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;
    if config.sources.is_empty() {
        return Err(ClientError::Config(format!(
            "no [[sources]] configured in {}",
            config_path.display()
        )));
    }

    let mut records = Vec::new();
    let mut failed = 0;

    for source in &config.sources {
        match fetch_source(&source.url, &source.group, timeout).await {
            Ok(mut batch) => {
                info!(group = %source.group, count = batch.len(), "Fetched source");
                records.append(&mut batch);
            }
            Err(e) => {
                warn!(
                    group = %source.group,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Source failed"
                );
                failed += 1;
            }
        }
    }

    print(&records, format)?;

    if failed > 0 {
        return Err(ClientError::PartialFailure {
            failed,
            total: config.sources.len(),
        });
    }
    Ok(())
}

async fn fetch_source(
    url: &str,
    group: &str,
    timeout: Duration,
) -> Result<Vec<EventRecord>, FetchError> {
    let config = FetchConfig::from_url(url)?.with_timeout(timeout);
    ScheduleClient::new(config)?.fetch_schedule(group).await
}

/// Reads and parses a schedule file, defaulting the group to the file stem.
pub fn parse_file(file: &Path, group: Option<String>) -> ClientResult<Vec<EventRecord>> {
    let is_stdin = file.as_os_str() == "-";

    let bytes = if is_stdin {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        std::fs::read(file)?
    };

    let group = group.unwrap_or_else(|| default_file_group(file, is_stdin));
    Ok(frabsched_core::parse(&bytes, &group)?)
}

fn default_file_group(file: &Path, is_stdin: bool) -> String {
    if is_stdin {
        return "stdin".to_string();
    }
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schedule".to_string())
}

fn print(records: &[EventRecord], format: OutputFormat) -> ClientResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_records(&mut out, records, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frabsched_fetch::FetchErrorCode;
    use std::io::Write;

    const XML: &str = r#"<schedule><day><room name="A">
  <event id="1"><date>2024-03-01T10:00:00Z</date><duration>00:30</duration></event>
</room></day></schedule>"#;

    #[test]
    fn parse_file_defaults_group_to_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fosdem-2024.xml");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(XML.as_bytes())
            .unwrap();

        let records = parse_file(&path, None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].group, "fosdem-2024");

        let records = parse_file(&path, Some("custom".to_string())).unwrap();
        assert_eq!(records[0].group, "custom");
    }

    #[test]
    fn parse_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&dir.path().join("nope.xml"), None).unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    fn parse_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<schedule>").unwrap();
        let err = parse_file(file.path(), None).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn stdin_group() {
        assert_eq!(default_file_group(Path::new("-"), true), "stdin");
        assert_eq!(default_file_group(Path::new("/tmp/a.b.xml"), false), "a.b");
    }

    #[tokio::test]
    async fn fetch_rejects_bad_url() {
        let err = fetch("nope", None, Duration::from_secs(1), OutputFormat::Text)
            .await
            .unwrap_err();
        match err {
            ClientError::Fetch(e) => {
                assert_eq!(e.code(), FetchErrorCode::ConfigurationError);
                assert!(std::error::Error::source(&e).is_some());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_source_keeps_url_error_source() {
        let err = fetch_source("nope", "g", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), FetchErrorCode::ConfigurationError);
        assert_eq!(err.url(), Some("nope"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn sources_requires_entries() {
        let path = Path::new("/etc/frabsched/custom.toml");
        let err = sources(
            &ClientConfig::default(),
            path,
            Duration::from_secs(1),
            OutputFormat::Text,
        )
        .await
        .unwrap_err();
        match err {
            ClientError::Config(message) => {
                assert!(message.contains("/etc/frabsched/custom.toml"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
}
