//! Trial report command
//!
//! Finds every trial log below a directory and prints the reaction time
//! statistics of each marker, one block per log.

use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use studylog_analysis::{
    aggregator::TrialReport,
    parser::{self, OrphanHitPolicy},
};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ReportArg {
    /// Directory searched recursively for CSV trial logs
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Handling of hit events without a preceding marker and found event (skip or fail)
    #[arg(long, default_value = "skip")]
    pub orphan_hit: OrphanHitPolicy,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: ReportFormat,

    /// Print the path of each trial log above its report (text format only)
    #[arg(long)]
    pub with_path: bool,

    /// Write the reports to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr, derive_more::Display)]
pub(crate) enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct TrialLogReport {
    path: PathBuf,
    #[serde(flatten)]
    report: TrialReport,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg {
        root,
        orphan_hit,
        format,
        with_path,
        output,
    } = arg;

    let paths = util::find_csv_files(root)?;
    log::info!("Found {} trial logs under {}", paths.len(), root.display());

    let mut output = Output::from_output_path(output.as_deref())?;
    match format {
        ReportFormat::Text => {
            for path in &paths {
                let report = analyze_trial(path, *orphan_hit)?;
                write_text_report(&mut output, path, &report, *with_path)?;
            }
            output
                .flush()
                .with_context(|| format!("Failed to flush output to {}", output.display_path()))?;
        }
        ReportFormat::Json => {
            let reports = paths
                .into_iter()
                .map(|path| {
                    let report = analyze_trial(&path, *orphan_hit)?;
                    Ok(TrialLogReport { path, report })
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            output.write_json(&reports)?;
        }
    }

    Ok(())
}

fn analyze_trial(path: &Path, orphan_hit: OrphanHitPolicy) -> anyhow::Result<TrialReport> {
    let trial = parser::parse_path(path, orphan_hit)
        .with_context(|| format!("Failed to parse trial log: {}", path.display()))?;

    log::info!(
        "{}: {} rows, {} markers, {} observations",
        path.display(),
        trial.rows,
        trial.aggregator.len(),
        trial.aggregator.observation_count()
    );
    if trial.skipped_hits > 0 {
        log::warn!(
            "{}: ignored {} orphan hit events",
            path.display(),
            trial.skipped_hits
        );
    }

    Ok(trial.aggregator.report())
}

fn write_text_report(
    output: &mut Output,
    path: &Path,
    report: &TrialReport,
    with_path: bool,
) -> anyhow::Result<()> {
    if with_path {
        writeln!(output, "{}:", path.display())
            .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
    }
    write!(output, "{report}")
        .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const TRIAL: &str = "\
0,Marker,0.0,A
0,Found,10.0,
0,Hit,12.5,
0,Marker,0.0,A
0,Found,20.0,
0,Hit,23.5,
0,Marker,0.0,B
0,Found,30.0,
0,Hit,31.0,
";

    fn arg(root: &Path, output: &Path) -> ReportArg {
        ReportArg {
            root: root.to_owned(),
            orphan_hit: OrphanHitPolicy::Skip,
            format: ReportFormat::Text,
            with_path: false,
            output: Some(output.to_owned()),
        }
    }

    #[test]
    fn test_text_report_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(logs.join("subject2")).unwrap();
        fs::write(logs.join("subject1.csv"), TRIAL).unwrap();
        fs::write(
            logs.join("subject2/trial.csv"),
            "0,Marker,,C\n0,Found,1.0,\n0,Hit,3.0,\n",
        )
        .unwrap();
        let output = dir.path().join("report.txt");

        run(&arg(&logs, &output)).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "A: Mean: 3 SD: 0.7071067811865476 SE: 0.5\n\
             B: Mean: 1 SD: NaN SE: NaN\n\
             C: Mean: 2 SD: NaN SE: NaN\n"
        );
    }

    #[test]
    fn test_text_report_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        let trial = logs.join("trial.csv");
        fs::write(&trial, "0,Marker,,C\n0,Found,1.0,\n0,Hit,3.0,\n").unwrap();
        let output = dir.path().join("report.txt");

        run(&ReportArg {
            with_path: true,
            ..arg(&logs, &output)
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            format!("{}:\nC: Mean: 2 SD: NaN SE: NaN\n", trial.display())
        );
    }

    #[test]
    fn test_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        fs::write(logs.join("trial.csv"), TRIAL).unwrap();
        let output = dir.path().join("report.json");

        run(&ReportArg {
            format: ReportFormat::Json,
            ..arg(&logs, &output)
        })
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let trials = json.as_array().unwrap();
        assert_eq!(trials.len(), 1);
        let markers = trials[0]["markers"].as_array().unwrap();
        assert_eq!(markers[0]["marker"], "A");
        assert_eq!(markers[0]["count"], 2);
        assert_eq!(markers[0]["mean"], 3.0);
        assert_eq!(markers[1]["marker"], "B");
        assert!(markers[1]["std_dev"].is_null());
    }

    #[test]
    fn test_orphan_hit_fail_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        let trial = logs.join("broken.csv");
        fs::write(&trial, "0,Marker,,A\n0,Hit,3.0,\n").unwrap();
        let output = dir.path().join("report.txt");

        let err = run(&ReportArg {
            orphan_hit: OrphanHitPolicy::Fail,
            ..arg(&logs, &output)
        })
        .unwrap_err();

        assert!(err.to_string().contains(&trial.display().to_string()));
        let cause = err.downcast_ref::<parser::ParseError>().unwrap();
        assert_eq!(cause.row(), Some(2));
    }

    #[test]
    fn test_orphan_hit_skipped_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        fs::write(logs.join("trial.csv"), "0,Hit,1.0,\n0,Marker,,A\n0,Found,1.0,\n0,Hit,1.5,\n").unwrap();
        let output = dir.path().join("report.txt");

        run(&arg(&logs, &output)).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "A: Mean: 0.5 SD: NaN SE: NaN\n"
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
    }
}
