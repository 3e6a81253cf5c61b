use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{ManifestReport, UNKNOWN_LICENSE};

/// Render a colored terminal report.
pub fn render(reports: &[ManifestReport], quiet: bool) {
    if quiet {
        for report in reports {
            println!(
                "{}  detected: {}  violations: {}  score: {}",
                report.manifest,
                report.result.detected.len(),
                violation_count(report),
                score_label(report.result.compliance_score),
            );
        }
        return;
    }

    println!(
        "\n {} v{}\n",
        "license-attest".bold(),
        env!("CARGO_PKG_VERSION")
    );

    for report in reports {
        println!(
            " {} {} ({})",
            "→".cyan(),
            report.manifest.bold(),
            report.format
        );
        render_table(report);

        let result = &report.result;
        println!(
            " Compliance score: {}   Violations: {}\n",
            score_label(result.compliance_score),
            violation_count(report),
        );
    }
}

fn render_table(report: &ManifestReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for license in report.result.detected.iter() {
        let (status, color) = if report.result.violations.contains(license) {
            ("✗ forbidden", Color::Red)
        } else if license == UNKNOWN_LICENSE {
            ("? no signal", Color::DarkGrey)
        } else {
            ("✓ allowed", Color::Green)
        };

        table.add_row(vec![
            Cell::new(license),
            Cell::new(status).fg(color).set_alignment(CellAlignment::Center),
        ]);
    }

    println!("{}", table);
}

fn violation_count(report: &ManifestReport) -> ColoredString {
    let count = report.result.violations.len().to_string();
    if report.result.is_compliant() {
        count.green()
    } else {
        count.red().bold()
    }
}

fn score_label(score: u32) -> ColoredString {
    let label = format!("{}/100", score);
    match score {
        100 => label.green(),
        60..=99 => label.yellow(),
        _ => label.red(),
    }
}
