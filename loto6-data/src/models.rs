use anyhow::{bail, Result};

/// Numbers drawn per Loto 6 round.
pub const PICK_COUNT: usize = 6;

/// Highest number in the Loto 6 pool; numbers run 1 through 43.
pub const POOL_SIZE: u8 = 43;

/// One historical draw, as published by the feed (oldest rows first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub date: String,
    pub numbers: [u8; PICK_COUNT],
}

/// Occurrence count and percentage share of one number within a window.
#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub number: u8,
    pub count: u32,
    /// Share of all appearances in the window, in percent.
    pub rate: f64,
}

/// Ranked rate table for one window, plus the dates the window covers.
#[derive(Debug, Clone)]
pub struct WindowReport {
    pub dates: Vec<String>,
    pub entries: Vec<RateEntry>,
}

pub fn validate_numbers(numbers: &[u8; PICK_COUNT]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("number {} out of range (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("duplicate number: {}", numbers[i]);
            }
        }
    }
    Ok(())
}

/// Deterministic synthetic draws for tests.
pub fn make_test_draws(n: usize) -> Vec<Draw> {
    (0..n)
        .map(|i| {
            let base = (i % 7) as u8;
            Draw {
                date: format!("2024/01/{:02}", (i % 28) + 1),
                numbers: [
                    base * 6 + 1,
                    base * 6 + 2,
                    base * 6 + 3,
                    base * 6 + 4,
                    base * 6 + 5,
                    base * 6 + 6,
                ],
            }
        })
        .collect()
}
