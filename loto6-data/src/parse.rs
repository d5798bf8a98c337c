use anyhow::{bail, Context, Result};

use crate::models::{validate_numbers, Draw, PICK_COUNT};

/// Header of the column holding the draw date.
pub const DATE_COLUMN: &str = "日付";

/// Header of the n-th drawn-number column (1-based).
pub fn number_column(n: usize) -> String {
    format!("第{}数字", n)
}

#[derive(Debug)]
pub struct ParseOutcome {
    pub draws: Vec<Draw>,
    pub total_rows: u32,
    pub bad_rows: u32,
}

/// Parse the feed payload into draws, keeping the feed's oldest-first order.
///
/// Columns are located by header name, so extra columns (bonus number,
/// round id, prizes) are ignored wherever they sit. Rows that do not carry
/// a date and six valid numbers are logged and skipped.
pub fn parse_table(csv_text: &str) -> Result<ParseOutcome> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers().context("feed has no header row")?.clone();

    let date_idx = find_column(&headers, DATE_COLUMN)?;
    let mut number_idx = [0usize; PICK_COUNT];
    for (i, idx) in number_idx.iter_mut().enumerate() {
        *idx = find_column(&headers, &number_column(i + 1))?;
    }

    let mut outcome = ParseOutcome {
        draws: Vec::new(),
        total_rows: 0,
        bad_rows: 0,
    };

    for record_result in reader.records() {
        outcome.total_rows += 1;
        match record_result {
            Ok(record) => match parse_record(&record, date_idx, &number_idx) {
                Ok(draw) => outcome.draws.push(draw),
                Err(e) => {
                    log::warn!("row {} skipped: {:#}", outcome.total_rows, e);
                    outcome.bad_rows += 1;
                }
            },
            Err(e) => {
                log::warn!("row {} unreadable: {}", outcome.total_rows, e);
                outcome.bad_rows += 1;
            }
        }
    }

    Ok(outcome)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .with_context(|| format!("column '{}' missing from feed header", name))
}

fn parse_record(
    record: &csv::StringRecord,
    date_idx: usize,
    number_idx: &[usize; PICK_COUNT],
) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("field missing at index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("cannot parse '{}' (index {})", s, idx))
    };

    let date = get(date_idx)?;
    if date.is_empty() {
        bail!("empty date");
    }

    let mut numbers = [0u8; PICK_COUNT];
    for (slot, &idx) in numbers.iter_mut().zip(number_idx) {
        *slot = get_u8(idx)?;
    }
    validate_numbers(&numbers)?;

    Ok(Draw { date, numbers })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = "\
回別,日付,第1数字,第2数字,第3数字,第4数字,第5数字,第6数字,ボーナス数字
第1回,2000/10/05,2,8,10,13,27,30,39
第2回,2000/10/12,1,9,16,20,21,43,5
第3回,2000/10/19,1,5,15,31,36,38,13
";

    #[test]
    fn test_number_column() {
        assert_eq!(number_column(1), "第1数字");
        assert_eq!(number_column(6), "第6数字");
    }

    #[test]
    fn test_parse_table() {
        let outcome = parse_table(FEED).unwrap();
        assert_eq!(outcome.total_rows, 3);
        assert_eq!(outcome.bad_rows, 0);
        assert_eq!(outcome.draws.len(), 3);

        assert_eq!(outcome.draws[0].date, "2000/10/05");
        assert_eq!(outcome.draws[0].numbers, [2, 8, 10, 13, 27, 30]);
        assert_eq!(outcome.draws[2].numbers, [1, 5, 15, 31, 36, 38]);
    }

    #[test]
    fn test_parse_table_ignores_column_order() {
        let feed = "\
日付,ボーナス数字,第6数字,第5数字,第4数字,第3数字,第2数字,第1数字
2024/01/04,7,43,34,23,12,5,1
";
        let outcome = parse_table(feed).unwrap();
        assert_eq!(outcome.draws.len(), 1);
        assert_eq!(outcome.draws[0].numbers, [1, 5, 12, 23, 34, 43]);
    }

    #[test]
    fn test_parse_table_missing_column() {
        let feed = "回別,日付,第1数字,第2数字\n第1回,2024/01/04,1,2\n";
        let err = parse_table(feed).unwrap_err();
        assert!(err.to_string().contains("第3数字"));
    }

    #[test]
    fn test_parse_table_skips_bad_rows() {
        let feed = "\
日付,第1数字,第2数字,第3数字,第4数字,第5数字,第6数字
2024/01/04,1,5,12,23,34,43
2024/01/11,1,5,12,23,34,44
2024/01/18,1,1,12,23,34,43
2024/01/25,1,5,abc,23,34,43
2024/02/01,6,7,8,9,10,11
";
        let outcome = parse_table(feed).unwrap();
        assert_eq!(outcome.total_rows, 5);
        assert_eq!(outcome.bad_rows, 3);
        assert_eq!(outcome.draws.len(), 2);
        assert_eq!(outcome.draws[1].numbers, [6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_parse_table_empty_body() {
        let feed = "日付,第1数字,第2数字,第3数字,第4数字,第5数字,第6数字\n";
        let outcome = parse_table(feed).unwrap();
        assert_eq!(outcome.total_rows, 0);
        assert_eq!(outcome.draws.len(), 0);
    }
}
