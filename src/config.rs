//! Run configuration, resolved from command-line flags.

use crate::error::ChartError;
use crate::model::GroupingAxis;
use clap::ValueEnum;
use regex::Regex;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Piece files are YAML documents.
pub const DEFAULT_INCLUDE: &str = r"\.ya?ml$";

/// Skips names starting with `.` or `_`, and reviewed copies.
pub const DEFAULT_EXCLUDE: &str = r"(^(\.|_)|_reviewed)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

/// Ordering of keys on the chart's vertical axis, as chosen with `--yaxis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum YAxis {
    #[default]
    Semitones,
    Fifths,
    Numeral,
}

impl From<YAxis> for GroupingAxis {
    fn from(axis: YAxis) -> Self {
        match axis {
            YAxis::Semitones => GroupingAxis::Semitones,
            YAxis::Fifths => GroupingAxis::Fifths,
            YAxis::Numeral => GroupingAxis::Numeral,
        }
    }
}

/// Flags as given on the command line, before validation.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub include: String,
    pub exclude: String,
    pub recursive: bool,
    pub out: Option<PathBuf>,
    pub axis: YAxis,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            dirs: Vec::new(),
            files: Vec::new(),
            include: DEFAULT_INCLUDE.to_string(),
            exclude: DEFAULT_EXCLUDE.to_string(),
            recursive: true,
            out: None,
            axis: YAxis::default(),
        }
    }
}

/// Which files make up the corpus.
#[derive(Debug, Clone)]
pub struct InputSelection {
    pub dirs: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub include: Regex,
    pub exclude: Regex,
    pub recursive: bool,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub inputs: InputSelection,
    /// Site root; charts go to `<out_dir>/gantt`
    pub out_dir: PathBuf,
    pub axis: GroupingAxis,
}

fn compile_pattern(pattern: &str) -> Result<Regex, ChartError> {
    Regex::new(pattern).map_err(|e| ChartError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

impl RunConfig {
    /// Validate CLI flags. Without any directory or file the current
    /// directory is scanned; without `out` the site is written there too.
    pub fn resolve(cli: CliConfig) -> Result<Self, ChartError> {
        let include = compile_pattern(&cli.include)?;
        let exclude = compile_pattern(&cli.exclude)?;

        let dirs = if cli.dirs.is_empty() && cli.files.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            cli.dirs
        };

        Ok(Self {
            inputs: InputSelection {
                dirs,
                files: cli.files,
                include,
                exclude,
                recursive: cli.recursive,
            },
            out_dir: cli.out.unwrap_or_else(|| PathBuf::from(".")),
            axis: cli.axis.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_scan_current_directory() {
        let config = RunConfig::resolve(CliConfig::default()).unwrap();
        assert_eq!(config.inputs.dirs, vec![PathBuf::from(".")]);
        assert!(config.inputs.files.is_empty());
        assert!(config.inputs.recursive);
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert_eq!(config.axis, GroupingAxis::Semitones);
    }

    #[test]
    fn test_files_only_does_not_scan_directory() {
        let cli = CliConfig {
            files: vec![PathBuf::from("piece.yml")],
            ..CliConfig::default()
        };
        let config = RunConfig::resolve(cli).unwrap();
        assert!(config.inputs.dirs.is_empty());
        assert_eq!(config.inputs.files, vec![PathBuf::from("piece.yml")]);
    }

    #[test]
    fn test_default_patterns() {
        let config = RunConfig::resolve(CliConfig::default()).unwrap();
        let include = &config.inputs.include;
        let exclude = &config.inputs.exclude;
        assert!(include.is_match("K279-1.yml"));
        assert!(include.is_match("K279-1.yaml"));
        assert!(!include.is_match("K279-1.mscx"));
        assert!(exclude.is_match(".git"));
        assert!(exclude.is_match("_private.yml"));
        assert!(exclude.is_match("K279-1_reviewed.yml"));
        assert!(!exclude.is_match("K279-1.yml"));
    }

    #[test]
    fn test_invalid_pattern() {
        let cli = CliConfig {
            include: "(unclosed".to_string(),
            ..CliConfig::default()
        };
        match RunConfig::resolve(cli) {
            Err(ChartError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(unclosed"),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::default().as_filter(), LevelFilter::INFO);
        assert_eq!(LogLevel::Debug.as_filter(), LevelFilter::DEBUG);
        assert_eq!(LogLevel::from_str("warn", true).unwrap(), LogLevel::Warn);
    }

    #[test]
    fn test_y_axis_flag_maps_to_grouping_axis() {
        let cli = CliConfig {
            axis: YAxis::from_str("fifths", true).unwrap(),
            ..CliConfig::default()
        };
        let config = RunConfig::resolve(cli).unwrap();
        assert_eq!(config.axis, GroupingAxis::Fifths);
        assert_eq!(GroupingAxis::from(YAxis::Numeral), GroupingAxis::Numeral);
    }
}
