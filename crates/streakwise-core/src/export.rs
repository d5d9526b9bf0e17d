//! Export of habit statistics in CSV and JSON formats

use crate::date::format_date;
use crate::tracker::HabitReport;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// Export data structure for JSON
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData<'a> {
    pub exported_for: String,
    pub habits: &'a [HabitReport],
}

pub struct Exporter {
    today: NaiveDate,
}

impl Exporter {
    /// Exporter for statistics evaluated as of `today`
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn export<W: Write>(
        &self,
        writer: W,
        reports: &[HabitReport],
        format: ExportFormat,
    ) -> Result<()> {
        match format {
            ExportFormat::Csv => self.export_csv(writer, reports),
            ExportFormat::Json => self.export_json(writer, reports),
        }
    }

    fn export_csv<W: Write>(&self, writer: W, reports: &[HabitReport]) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "name",
            "current_streak",
            "longest_streak",
            "completion_rate",
            "total_checkins",
            "total_expected_days",
        ])?;

        for report in reports {
            let stats = &report.stats;
            csv_writer.write_record([
                report.id.clone(),
                report.name.clone(),
                stats.current_streak.to_string(),
                stats.longest_streak.to_string(),
                stats.completion_rate.to_string(),
                stats.total_checkins.to_string(),
                stats.total_expected_days.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    fn export_json<W: Write>(&self, mut writer: W, reports: &[HabitReport]) -> Result<()> {
        let export_data = ExportData {
            exported_for: format_date(self.today),
            habits: reports,
        };

        let json = serde_json::to_string_pretty(&export_data)?;
        writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StreakStats;

    fn reports() -> Vec<HabitReport> {
        vec![HabitReport {
            id: "read".to_string(),
            name: "Read, daily".to_string(),
            stats: StreakStats {
                current_streak: 3,
                longest_streak: 5,
                completion_rate: 73,
                total_checkins: 8,
                total_expected_days: 11,
            },
        }]
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(ExportFormat::from_str("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_str("json"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_str("xml"), None);
    }

    #[test]
    fn test_csv_export() {
        let mut out = Vec::new();
        Exporter::new(today())
            .export(&mut out, &reports(), ExportFormat::Csv)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "id,name,current_streak,longest_streak,completion_rate,total_checkins,total_expected_days"
        );
        assert_eq!(lines[1], r#"read,"Read, daily",3,5,73,8,11"#);
    }

    #[test]
    fn test_json_export() {
        let mut out = Vec::new();
        Exporter::new(today())
            .export(&mut out, &reports(), ExportFormat::Json)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["exportedFor"], "2025-12-31");
        assert_eq!(value["habits"][0]["id"], "read");
        assert_eq!(value["habits"][0]["currentStreak"], 3);
        assert_eq!(value["habits"][0]["completionRate"], 73);
    }
}
