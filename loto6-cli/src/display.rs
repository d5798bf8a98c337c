use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use loto6_data::feed::FeedOrigin;
use loto6_data::models::{Draw, RateEntry, WindowReport};
use loto6_data::parse::ParseOutcome;

use crate::wheel::Grid;

pub fn display_feed_origin(origin: &FeedOrigin) {
    match origin {
        FeedOrigin::Remote => println!("Draw history fetched from the remote feed."),
        FeedOrigin::CacheFallback { fetch_error } => {
            println!("⚠ Remote fetch failed ({fetch_error}); using the local cache.");
        }
    }
}

pub fn display_parse_outcome(outcome: &ParseOutcome) {
    println!("Rows read   : {}", outcome.total_rows);
    println!("Draws kept  : {}", outcome.draws.len());
    if outcome.bad_rows > 0 {
        println!("Rows skipped: {}", outcome.bad_rows);
    }
}

pub fn display_grids(grids: &[Grid], total: usize) {
    println!("\n🎲 {} combinations generated, showing {}\n", total, grids.len());
    if grids.is_empty() {
        println!("Nothing to show.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numbers"]);

    for (i, grid) in grids.iter().enumerate() {
        let numbers_str = grid
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![&format!("{}", i + 1), &numbers_str]);
    }
    println!("{table}");
}

pub fn display_window_report(label: &str, report: &WindowReport) {
    println!("\n── Window {} ──", label);
    println!("{}", report.dates.join(", "));
    display_rate_table(&report.entries);
}

pub fn display_combined(label: &str, entries: &[RateEntry]) {
    println!("\n🎯 Windows {} combined\n", label);
    display_rate_table(entries);
}

pub fn display_recent_report(span: usize, report: &WindowReport) {
    println!("\n📊 Last {} draws\n", span);
    display_rate_table(&report.entries);
}

fn display_rate_table(entries: &[RateEntry]) {
    if entries.is_empty() {
        println!("No draws in this window.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Number", "Count", "Rate"]);

    for entry in entries {
        table.add_row(vec![
            &format!("{:2}", entry.number),
            &entry.count.to_string(),
            &format!("{:.2} %", entry.rate),
        ]);
    }
    println!("{table}");
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("No draws to show.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Numbers"]);

    for draw in draws {
        let mut sorted_numbers = draw.numbers;
        sorted_numbers.sort();

        let numbers_str = sorted_numbers
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![&draw.date, &numbers_str]);
    }
    println!("{table}");
}
