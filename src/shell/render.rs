use prettytable::{Table, format, row};
use serde::Serialize;

use super::error::ShellResult;
use crate::config::OutputFormat;
use crate::index::IndexStats;
use crate::session::{BucketReport, PagingReport, ScanReport, SearchReport};

fn render<T: Serialize>(
    report: &T,
    output: OutputFormat,
    as_text: impl FnOnce(&T) -> String,
) -> ShellResult<String> {
    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(as_text(report)),
    }
}

fn key_value_table(rows: &[(&str, String)]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    for (name, value) in rows {
        table.add_row(row![b -> name, value]);
    }
    table.to_string()
}

fn or_unknown(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn paging(report: &PagingReport, output: OutputFormat) -> ShellResult<String> {
    render(report, output, |r| {
        key_value_table(&[
            ("Page size", r.page_size.to_string()),
            ("Pages", r.page_count.to_string()),
            ("Records", r.records.to_string()),
        ])
    })
}

pub fn scan(report: &ScanReport, output: OutputFormat) -> ShellResult<String> {
    render(report, output, |r| {
        let headline = match &r.found {
            Some(key) => format!("Record '{}' found by table scan", key),
            None => format!(
                "No record with key '{}' in the first {} records",
                r.key, r.limit
            ),
        };
        let details = key_value_table(&[
            ("Position", or_unknown(r.position)),
            ("Records read", r.probes.to_string()),
            ("Pages read (est.)", or_unknown(r.pages_read)),
        ]);
        format!("{}\n{}", headline, details)
    })
}

pub fn search(report: &SearchReport, output: OutputFormat) -> ShellResult<String> {
    render(report, output, |r| match &r.found {
        Some(key) => {
            let verified = match r.page_verified {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            };
            let details = key_value_table(&[
                ("Bucket", r.bucket.to_string()),
                ("Page", or_unknown(r.page_ref)),
                ("Found in page", verified.to_string()),
            ]);
            format!("Record '{}' found in the index\n{}", key, details)
        }
        None => format!(
            "No record with key '{}' in the buckets (bucket {})",
            r.key, r.bucket
        ),
    })
}

pub fn bucket(report: &BucketReport, output: OutputFormat) -> ShellResult<String> {
    render(report, output, |r| {
        key_value_table(&[
            ("Bucket", r.bucket.to_string()),
            ("Capacity", r.capacity.to_string()),
            ("Slots used", r.slots_used.to_string()),
            ("Overflow buckets", r.chain_len.to_string()),
            ("Collisions", r.collisions.to_string()),
            ("Overflows", r.overflows.to_string()),
        ])
    })
}

pub fn stats(stats: &IndexStats, output: OutputFormat) -> ShellResult<String> {
    render(stats, output, |s| {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row!["Bucket", "Slots", "Chain", "Collisions", "Overflows"]);
        for bucket in &s.buckets {
            table.add_row(row![
                r -> bucket.bucket,
                r -> bucket.slots_used,
                r -> bucket.chain_len,
                r -> bucket.collisions,
                r -> bucket.overflows
            ]);
        }

        format!(
            "{} buckets of {} slots, {} records, {} overflow buckets, {} collisions, dispersion {:.2}%\n{}",
            s.bucket_count,
            s.bucket_capacity,
            s.records,
            s.overflow_buckets,
            s.total_collisions,
            s.dispersion,
            table
        )
    })
}
