//! Plain-text rendering of a `FleetView` for the `watch` command.

use std::fmt::Write;

use super::present::{FleetView, TableRow};
use crate::net::ChannelStatus;

const HEADERS: [&str; 7] = [
    "Robot ID",
    "Status",
    "Battery (%)",
    "CPU Usage (%)",
    "RAM Consumption (MB)",
    "Last Updated",
    "Location",
];

#[must_use]
pub fn render(view: &FleetView, channel: ChannelStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Robot Monitoring Dashboard  [filter: {}] [showing {}/{}] [channel: {}] [rev {}]",
        view.selector,
        view.rows.len(),
        view.total,
        channel_label(channel),
        view.revision,
    );
    out.push('\n');
    render_table(&mut out, &view.rows);
    out.push('\n');
    let _ = writeln!(out, "Map markers ({}):", view.markers.len());
    for marker in &view.markers {
        let _ = writeln!(
            out,
            "  {} @ {:.2}, {:.2}  {} {}%",
            marker.id, marker.latitude, marker.longitude, marker.status, marker.battery
        );
    }
    out
}

#[must_use]
pub fn channel_label(status: ChannelStatus) -> &'static str {
    match status {
        ChannelStatus::Connecting => "connecting",
        ChannelStatus::Open => "live",
        ChannelStatus::Closed => "closed, reconnecting",
        ChannelStatus::Errored => "error, reconnecting",
        ChannelStatus::Stopped => "stopped",
    }
}

fn render_table(out: &mut String, rows: &[TableRow]) {
    let cells: Vec<[&str; 7]> = rows
        .iter()
        .map(|row| {
            [
                row.id.as_str(),
                row.status.as_str(),
                row.battery.as_str(),
                row.cpu.as_str(),
                row.ram.as_str(),
                row.last_updated.as_str(),
                row.location.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(out, &HEADERS, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
    write_line(out, &rule, &widths);
    for line in &cells {
        write_line(out, line, &widths);
    }
    if cells.is_empty() {
        out.push_str("(no robots)\n");
    }
}

fn write_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;
