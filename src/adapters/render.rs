use crate::adapters::probe::ProbeResponse;
use crate::domain::model::{CatalogRecord, OutputFormat};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializes with a four-space indent.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn render_records(records: &[CatalogRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(records),
        OutputFormat::Pretty => {
            let rows = records
                .iter()
                .map(|r| {
                    vec![
                        r.node.clone(),
                        r.address.clone(),
                        r.datacenter.clone(),
                        r.service_id.clone(),
                        port_cell(r.service_port),
                        r.service_tags.join(","),
                    ]
                })
                .collect::<Vec<_>>();
            Ok(format_table(
                &["NODE", "ADDRESS", "DATACENTER", "SERVICE", "PORT", "TAGS"],
                &rows,
            ))
        }
    }
}

pub fn render_services(
    services: &BTreeMap<String, Vec<String>>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(services),
        OutputFormat::Pretty => {
            let rows = services
                .iter()
                .map(|(name, tags)| vec![name.clone(), tags.join(",")])
                .collect::<Vec<_>>();
            Ok(format_table(&["SERVICE", "TAGS"], &rows))
        }
    }
}

pub fn render_probe(response: &ProbeResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(response),
        OutputFormat::Pretty => Ok(format!(
            "{} {} {}\n\n{}",
            response.node, response.status, response.url, response.body
        )),
    }
}

fn port_cell(port: u16) -> String {
    if port == 0 {
        "-".to_string()
    } else {
        port.to_string()
    }
}

fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(table_line(headers.iter().copied(), &widths));
    for row in rows {
        lines.push(table_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}
