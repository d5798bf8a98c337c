use std::ops::Range;

use loto6_data::models::{Draw, RateEntry, WindowReport, POOL_SIZE};

/// Occurrence counts and percentage shares for one window of the table,
/// ranked by share descending, ties broken by ascending number.
///
/// `window` must lie within the table; `recent_windows` and `recent_range`
/// hand out valid ones.
pub fn occurrence_rates(draws: &[Draw], window: Range<usize>) -> WindowReport {
    let rows = &draws[window];

    let mut counts = vec![0u32; POOL_SIZE as usize + 1];
    for draw in rows {
        for &n in &draw.numbers {
            let idx = n as usize;
            if idx < counts.len() {
                counts[idx] += 1;
            }
        }
    }

    let total: u32 = counts.iter().sum();
    let mut entries = Vec::new();
    for (number, &count) in counts.iter().enumerate() {
        if count > 0 {
            entries.push(RateEntry {
                number: number as u8,
                count,
                rate: count as f64 / total as f64 * 100.0,
            });
        }
    }

    // within one window the count order is the rate order, so the integer
    // sort suffices
    entries.sort_by(|a, b| b.count.cmp(&a.count).then(a.number.cmp(&b.number)));

    WindowReport {
        dates: rows.iter().map(|d| d.date.clone()).collect(),
        entries,
    }
}

/// Sum each number's share across two windows, a number absent from one
/// side counting zero there, and rank the totals. Keeps the `top_n` best.
pub fn combine_rates(a: &[RateEntry], b: &[RateEntry], top_n: usize) -> Vec<RateEntry> {
    let mut merged = vec![(0u32, 0.0f64); POOL_SIZE as usize + 1];
    for entry in a.iter().chain(b) {
        let idx = entry.number as usize;
        if idx < merged.len() {
            merged[idx].0 += entry.count;
            merged[idx].1 += entry.rate;
        }
    }

    let mut combined = Vec::new();
    for (number, &(count, rate)) in merged.iter().enumerate() {
        if count > 0 {
            combined.push(RateEntry {
                number: number as u8,
                count,
                rate,
            });
        }
    }

    combined.sort_by(|x, y| {
        y.rate
            .partial_cmp(&x.rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(x.number.cmp(&y.number))
    });
    combined.truncate(top_n);
    combined
}
