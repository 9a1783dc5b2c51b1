//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed tables with colors
    #[default]
    Pretty,
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// YAML output
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "table" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json, csv, yaml",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Render a serializable value in a machine format.
///
/// Returns `None` for [`OutputFormat::Pretty`], which each command renders
/// itself.
pub fn render<T: Serialize>(format: OutputFormat, value: &T) -> Result<Option<String>> {
    let text = match format {
        OutputFormat::Pretty => return Ok(None),
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.serialize(value)?;
            finish_csv(writer)?
        }
    };
    Ok(Some(text.trim_end().to_string()))
}

/// Render a raw backend reply.
///
/// Pretty and JSON print it indented in server key order; CSV gets the
/// compact single line.
pub fn render_reply(format: OutputFormat, reply: &Value) -> Result<String> {
    Ok(match format {
        OutputFormat::Pretty | OutputFormat::Json => format!("{reply:#}"),
        OutputFormat::Yaml => serde_yaml::to_string(reply)?.trim_end().to_string(),
        OutputFormat::Csv => reply.to_string(),
    })
}

/// Render a list of records; CSV gets one header and one line per record.
pub fn render_rows<T: Serialize>(format: OutputFormat, rows: &[T]) -> Result<Option<String>> {
    if format != OutputFormat::Csv {
        return render(format, &rows);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let text = finish_csv(writer)?;
    Ok(Some(text.trim_end().to_string()))
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("CSV write failed: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Spinner shown while a request is in flight (pretty output only).
pub fn spinner(format: OutputFormat, message: &str) -> ProgressBar {
    if format != OutputFormat::Pretty {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        domain: &'static str,
        local_port: &'static str,
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_pretty_is_left_to_caller() {
        assert!(render(OutputFormat::Pretty, &1).unwrap().is_none());
    }

    #[test]
    fn test_reply_keeps_server_order() {
        let reply: Value = serde_json::from_str(r#"{"ok":true,"pid":7,"domain":"x"}"#).unwrap();
        assert_eq!(
            render_reply(OutputFormat::Csv, &reply).unwrap(),
            r#"{"ok":true,"pid":7,"domain":"x"}"#
        );
        assert!(render_reply(OutputFormat::Json, &reply)
            .unwrap()
            .starts_with("{\n  \"ok\": true,\n  \"pid\": 7"));
    }

    #[test]
    fn test_csv_rows() {
        let rows = [
            Row { domain: "a.example.com", local_port: "80" },
            Row { domain: "b.example.com", local_port: "81" },
        ];
        let text = render_rows(OutputFormat::Csv, &rows).unwrap().unwrap();
        assert_eq!(text, "domain,local_port\na.example.com,80\nb.example.com,81");
    }
}
