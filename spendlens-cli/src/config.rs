use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use spendlens_core::NecessityTable;
use spendlens_finance::ReportSettings;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "dashboard.html";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA zone used to compute the processing date; local time when unset
    pub timezone: Option<String>,
    pub report: ReportSection,
    /// Overrides and additions to the built-in necessity table
    pub necessity: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub top_cuts: Option<usize>,
    pub top_questionable: Option<usize>,
    pub output: Option<PathBuf>,
    pub open_browser: Option<bool>,
}

/// Read the config file, or the defaults when no path is given.
/// A path that was asked for but does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(p) = path else {
        return Ok(Config::default());
    };
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

impl Config {
    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| anyhow!("unknown timezone '{}': {}", name, e))
            })
            .transpose()
    }

    /// "Today" in the configured timezone
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(match self.timezone()? {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        })
    }

    pub fn necessity_table(&self) -> Result<NecessityTable> {
        NecessityTable::default()
            .with_overrides(self.necessity.iter().map(|(k, v)| (k.as_str(), *v)))
            .context("invalid [necessity] table")
    }

    /// List lengths, with command-line values taking precedence
    pub fn report_settings(
        &self,
        top_cuts: Option<usize>,
        top_questionable: Option<usize>,
    ) -> ReportSettings {
        let defaults = ReportSettings::default();
        ReportSettings {
            top_cuts: top_cuts
                .or(self.report.top_cuts)
                .unwrap_or(defaults.top_cuts),
            top_questionable: top_questionable
                .or(self.report.top_questionable)
                .unwrap_or(defaults.top_questionable),
        }
    }

    pub fn output_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.report.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn open_browser(&self, no_open: bool) -> bool {
        !no_open && self.report.open_browser.unwrap_or(true)
    }
}
