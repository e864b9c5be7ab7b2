//! Merge of per-stratum buffers back into row order.

use spei_calendar::SeriesBounds;

use crate::error::SpeiError;
use crate::transform::StratumIndex;

/// Writes every `(year, doy, value)` of `buffers` to the row it labels.
///
/// Placeholder entries are dropped. Each row of the series must be written
/// exactly once.
///
/// # Errors
///
/// Returns [`SpeiError::ReassemblyMismatch`] when the buffers do not cover
/// every row exactly once.
pub fn reassemble(buffers: &[StratumIndex], bounds: &SeriesBounds) -> Result<Vec<f64>, SpeiError> {
    let n_rows = bounds.n_rows();
    let mut out = vec![f64::NAN; n_rows];
    let mut written = vec![false; n_rows];

    for buf in buffers {
        let doy = buf.doy();
        for (year, &value) in (bounds.start_year()..).zip(buf.values()) {
            let Some(row) = bounds.row_index(year, doy) else {
                continue;
            };
            if written[row] {
                return Err(SpeiError::ReassemblyMismatch {
                    expected: n_rows,
                    got: n_rows + 1,
                });
            }
            out[row] = value;
            written[row] = true;
        }
    }

    let got = written.iter().filter(|w| **w).count();
    if got != n_rows {
        return Err(SpeiError::ReassemblyMismatch {
            expected: n_rows,
            got,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpeiConfig;
    use crate::strata::gather_strata;
    use crate::transform::transform_strata;
    use chrono::NaiveDate;
    use spei_calendar::label_series;

    fn bounds_for(start: (i32, u32, u32), end: (i32, u32, u32)) -> SeriesBounds {
        let s = NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap();
        let e = NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap();
        let dates: Vec<NaiveDate> = s
            .iter_days()
            .take_while(|d| *d <= e)
            .filter(|d| !spei_calendar::is_leap_day(*d))
            .collect();
        SeriesBounds::from_labels(&label_series(&dates).unwrap()).unwrap()
    }

    #[test]
    fn every_row_written_once() {
        let b = bounds_for((2016, 9, 1), (2019, 4, 30));
        let rolling: Vec<f64> = (0..b.n_rows()).map(|i| (i % 31) as f64).collect();
        let strata = gather_strata(&rolling, &b);
        let buffers = transform_strata(&strata, &b, &SpeiConfig::new()).unwrap();
        let index = reassemble(&buffers, &b).unwrap();
        assert_eq!(index.len(), b.n_rows());
        assert!(index.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn missing_buffer_is_detected() {
        let b = bounds_for((2016, 9, 1), (2019, 4, 30));
        let strata = gather_strata(&vec![0.0; b.n_rows()], &b);
        let mut buffers = transform_strata(&strata, &b, &SpeiConfig::new()).unwrap();
        buffers.pop();
        let err = reassemble(&buffers, &b).unwrap_err();
        assert!(matches!(err, SpeiError::ReassemblyMismatch { .. }));
    }

    #[test]
    fn duplicated_buffer_is_detected() {
        let b = bounds_for((2016, 9, 1), (2019, 4, 30));
        let strata = gather_strata(&vec![0.0; b.n_rows()], &b);
        let mut buffers = transform_strata(&strata, &b, &SpeiConfig::new()).unwrap();
        buffers.push(buffers[0].clone());
        assert!(reassemble(&buffers, &b).is_err());
    }
}
