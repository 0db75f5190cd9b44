use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::Serialize;

use crate::pipeline::PizzaReport;
use crate::stat_columns::Direction;

/// Document handed to an external chart renderer.
#[derive(Debug, Serialize)]
struct RendererDocument<'a> {
    generated_at: String,
    title: &'a str,
    caption: &'a str,
    params: Vec<&'a str>,
    values: Vec<u8>,
    report: &'a PizzaReport,
}

pub fn report_to_json(report: &PizzaReport) -> Result<String> {
    let doc = RendererDocument {
        generated_at: Utc::now().to_rfc3339(),
        title: &report.title,
        caption: &report.caption,
        params: report.slices.iter().map(|s| s.label.as_str()).collect(),
        values: report.slices.iter().map(|s| s.value).collect(),
        report,
    };
    serde_json::to_string_pretty(&doc).context("serialize pizza report")
}

pub fn export_json(path: &Path, report: &PizzaReport) -> Result<()> {
    let json = report_to_json(report)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

pub fn export_workbook(path: &Path, report: &PizzaReport) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Pizza")?;
        write_rows(sheet, &slice_rows(report))?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Request")?;
        write_rows(sheet, &request_rows(report))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn slice_rows(report: &PizzaReport) -> Vec<Vec<String>> {
    let mut rows = vec![vec![
        "Statistic".to_string(),
        "Value".to_string(),
        "Percentile".to_string(),
        "Rank".to_string(),
        "Direction".to_string(),
    ]];
    for r in &report.results {
        let direction = match r.column.direction {
            Direction::HigherBetter => "higher is better",
            Direction::LowerBetter => "lower is better",
        };
        rows.push(vec![
            r.column.name.clone(),
            format!("{:.2}", r.raw_value),
            r.percentile.to_string(),
            format!("{}/{}", r.rank, report.cohort_size),
            direction.to_string(),
        ]);
    }
    rows
}

fn request_rows(report: &PizzaReport) -> Vec<Vec<String>> {
    let req = &report.request;
    vec![
        vec!["Season".to_string(), req.season.clone()],
        vec!["League".to_string(), req.league.clone()],
        vec!["Position".to_string(), req.position.to_string()],
        vec!["Min. minutes".to_string(), req.min_minutes.to_string()],
        vec!["Squad".to_string(), req.squad.clone().unwrap_or_default()],
        vec!["Player".to_string(), req.player.clone()],
        vec!["Per 90".to_string(), req.per_90.to_string()],
        vec!["Minutes played".to_string(), report.minutes_played.to_string()],
        vec!["Cohort size".to_string(), report.cohort_size.to_string()],
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
