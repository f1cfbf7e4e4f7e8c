//! Payload rendering for the non-interactive commands.

use pm_common::{OutputFormat, ProcessId};
use serde::Serialize;

use crate::action::KillSignal;
use crate::collect::{ProcessRecord, ScanMetadata};

/// Column header matching [`ProcessRecord::display_line`].
pub const LIST_HEADER: &str = "PID     USER        COMMAND";

/// Result of `procman list`.
#[derive(Debug, Clone, Serialize)]
pub struct ListReport {
    pub run_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Records before filtering.
    pub total: usize,
    pub processes: Vec<ProcessRecord>,
    pub scan: ScanMetadata,
}

/// Result of `procman kill`.
#[derive(Debug, Clone, Serialize)]
pub struct KillReport {
    pub run_id: String,
    pub pid: ProcessId,
    pub signal: KillSignal,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn render_list(report: &ListReport, format: OutputFormat) -> serde_json::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Jsonl => {
            let mut out = String::new();
            for record in &report.processes {
                out.push_str(&serde_json::to_string(record)?);
                out.push('\n');
            }
            out
        }
        OutputFormat::Md => {
            let mut out = String::from(LIST_HEADER);
            out.push('\n');
            for record in &report.processes {
                out.push_str(&record.display_line());
                out.push('\n');
            }
            out
        }
        OutputFormat::Summary => format!("{}\n", list_summary(report)),
    })
}

fn list_summary(report: &ListReport) -> String {
    match &report.query {
        Some(query) => format!(
            "{} of {} processes match {:?}",
            report.processes.len(),
            report.total,
            query
        ),
        None => format!("{} processes", report.total),
    }
}

pub fn render_kill(report: &KillReport, format: OutputFormat) -> serde_json::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Jsonl => format!("{}\n", serde_json::to_string(report)?),
        OutputFormat::Md | OutputFormat::Summary => match &report.error {
            None => format!("Sent {} to process {}\n", report.signal, report.pid),
            Some(error) => format!(
                "Failed to send {} to process {}: {}\n",
                report.signal, report.pid, error
            ),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(query: Option<&str>) -> ListReport {
        ListReport {
            run_id: "run-000000000000".to_string(),
            query: query.map(str::to_string),
            total: 3,
            processes: vec![
                ProcessRecord::new(2u32, "bob", "y"),
                ProcessRecord::new(3u32, "carol", "zzy"),
            ],
            scan: ScanMetadata {
                started_at: "2026-01-01T00:00:00+00:00".to_string(),
                duration_ms: 1,
                process_count: 3,
                skipped: 0,
            },
        }
    }

    #[test]
    fn md_uses_display_lines_under_header() {
        let out = render_list(&report(None), OutputFormat::Md).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], LIST_HEADER);
        assert_eq!(lines[1], ProcessRecord::new(2u32, "bob", "y").display_line());
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn header_columns_line_up_with_rows() {
        let line = ProcessRecord::new(1u32, "u", "cmd").display_line();
        assert_eq!(LIST_HEADER.find("USER"), line.find('u'));
        assert_eq!(LIST_HEADER.find("COMMAND"), line.find("cmd"));
    }

    #[test]
    fn jsonl_has_one_record_per_line() {
        let out = render_list(&report(Some("y")), OutputFormat::Jsonl).unwrap();
        let rows: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["pid"], 3);
        assert_eq!(rows[1]["owner"], "carol");
    }

    #[test]
    fn json_includes_query_and_scan() {
        let out = render_list(&report(Some("y")), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["query"], "y");
        assert_eq!(value["total"], 3);
        assert_eq!(value["scan"]["process_count"], 3);
    }

    #[test]
    fn summary_counts_matches() {
        let out = render_list(&report(Some("y")), OutputFormat::Summary).unwrap();
        assert_eq!(out, "2 of 3 processes match \"y\"\n");
    }

    #[test]
    fn kill_report_renders_failure() {
        let report = KillReport {
            run_id: "run-x".to_string(),
            pid: ProcessId(9),
            signal: KillSignal::Term,
            delivered: false,
            error: Some("permission denied signalling process 9".to_string()),
        };
        let out = render_kill(&report, OutputFormat::Md).unwrap();
        assert!(out.starts_with("Failed to send SIGTERM to process 9"));
        let json: serde_json::Value =
            serde_json::from_str(&render_kill(&report, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["signal"], "term");
        assert_eq!(json["delivered"], false);
    }
}
