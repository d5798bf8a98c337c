pub mod sampler;

use anyhow::{bail, Context, Result};

use loto6_data::models::PICK_COUNT;

/// One playable combination, sorted ascending.
pub type Grid = [u8; PICK_COUNT];

/// Numbers taken from the candidate set.
pub const FIXED_PICKS: usize = 4;

/// Numbers taken from whatever the exclusions leave over.
pub const FREE_PICKS: usize = 2;

/// Parse a comma-separated number list; empty input is an empty list.
pub fn parse_number_list(s: &str) -> Result<Vec<u8>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<u8>()
                .with_context(|| format!("cannot parse number '{}'", part))
        })
        .collect()
}

/// Enumerate every grid made of four candidates plus two numbers from the
/// remaining allowed pool.
///
/// The free pool is the full range minus the exclusions minus the four
/// chosen candidates, so unchosen candidates stay eligible. Different 4+2
/// splits can land on the same sorted grid; such repeats are kept, which
/// weights the sample towards grids reachable through more splits.
pub fn enumerate_grids(candidates: &[u8], excluded: &[u8], total_range: u8) -> Result<Vec<Grid>> {
    let free_pool_len = validate_wheel(candidates, excluded, total_range)?;

    let mut allowed = vec![true; total_range as usize + 1];
    allowed[0] = false;
    for &e in excluded {
        allowed[e as usize] = false;
    }

    let n = candidates.len();
    let capacity =
        binomial(n as u64, FIXED_PICKS as u64) * binomial(free_pool_len as u64, FREE_PICKS as u64);
    let mut grids = Vec::with_capacity(capacity as usize);

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let four = [candidates[i], candidates[j], candidates[k], candidates[l]];
                    let pool: Vec<u8> = (1..=total_range)
                        .filter(|m| allowed[*m as usize] && !four.contains(m))
                        .collect();
                    for x in 0..pool.len() {
                        for y in (x + 1)..pool.len() {
                            let mut grid: Grid =
                                [four[0], four[1], four[2], four[3], pool[x], pool[y]];
                            grid.sort();
                            grids.push(grid);
                        }
                    }
                }
            }
        }
    }

    Ok(grids)
}

/// Check the wheel parameters; returns the free-pool size left once four
/// candidates are taken.
fn validate_wheel(candidates: &[u8], excluded: &[u8], total_range: u8) -> Result<usize> {
    if (total_range as usize) < PICK_COUNT {
        bail!(
            "range {} cannot host a {}-number grid",
            total_range,
            PICK_COUNT
        );
    }
    if candidates.len() < FIXED_PICKS {
        bail!(
            "need at least {} candidates, got {}",
            FIXED_PICKS,
            candidates.len()
        );
    }
    for &c in candidates {
        if c < 1 || c > total_range {
            bail!("candidate {} out of range (1-{})", c, total_range);
        }
    }
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            if candidates[i] == candidates[j] {
                bail!("duplicate candidate: {}", candidates[i]);
            }
        }
    }
    for &e in excluded {
        if e < 1 || e > total_range {
            bail!("excluded number {} out of range (1-{})", e, total_range);
        }
        if candidates.contains(&e) {
            bail!("number {} is both a candidate and excluded", e);
        }
    }

    let mut banned = vec![false; total_range as usize + 1];
    let mut allowed_count = total_range as usize;
    for &e in excluded {
        if !banned[e as usize] {
            banned[e as usize] = true;
            allowed_count -= 1;
        }
    }
    if allowed_count < FIXED_PICKS + FREE_PICKS {
        bail!(
            "exclusions leave only {} numbers, fewer than the {} a grid needs",
            allowed_count,
            FIXED_PICKS + FREE_PICKS
        );
    }
    Ok(allowed_count - FIXED_PICKS)
}

/// n choose k; exact for the pool sizes seen here.
fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1u64;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}
