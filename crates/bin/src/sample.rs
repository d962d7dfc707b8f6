//! Deterministic synthetic transactions for demonstration runs.
//!
//! Customer spend follows a steep power law so the A/B/C split is visible,
//! with a seasonal wobble per quarter. Some customers skip quarters and a
//! few book zero-value sales.

use abc_core::{CustomerId, TransactionRecord};
use chrono::{Days, Months, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SampleError {
    #[error("need at least one customer and one quarter (got {customers} x {quarters})")]
    EmptyShape { customers: usize, quarters: u32 },

    #[error("start date {0} is too far in the future")]
    DateOverflow(NaiveDate),
}

/// Shape of the generated dataset.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SampleShape {
    pub(crate) customers: usize,
    pub(crate) quarters: u32,
    pub(crate) start: NaiveDate,
    pub(crate) malformed: usize,
}

fn customer_id(index: usize) -> CustomerId {
    CustomerId::new(format!("C{:04}", index + 1))
}

pub(crate) fn generate_transactions(
    shape: SampleShape,
) -> Result<Vec<TransactionRecord>, SampleError> {
    if shape.customers == 0 || shape.quarters == 0 {
        return Err(SampleError::EmptyShape {
            customers: shape.customers,
            quarters: shape.quarters,
        });
    }

    let mut records = Vec::new();

    for q in 0..shape.quarters {
        let quarter_start = shape
            .start
            .checked_add_months(Months::new(3 * q))
            .ok_or(SampleError::DateOverflow(shape.start))?;
        let season = 1.0 + 0.25 * (f64::from(q) * 1.7).sin();

        for c in 0..shape.customers {
            // Skip roughly one customer-quarter in five.
            if (c * 7 + q as usize * 3) % 5 == 0 {
                continue;
            }

            let weight = 10_000.0 / ((c + 1) as f64).powf(1.2);
            let wobble = 1.0 + 0.15 * ((c as f64) * 0.9 + f64::from(q)).cos();
            let sales = if c % 11 == 10 {
                0.0
            } else {
                (weight * season * wobble * 100.0).round() / 100.0
            };

            // Split each customer-quarter into up to three purchases.
            let purchases = 1 + (c + q as usize) % 3;
            for p in 0..purchases {
                let offset = ((c * 13 + p * 29) % 89) as u64;
                let date = quarter_start
                    .checked_add_days(Days::new(offset))
                    .ok_or(SampleError::DateOverflow(shape.start))?;
                records.push(TransactionRecord::new(
                    date,
                    customer_id(c),
                    sales / purchases as f64,
                ));
            }
        }
    }

    // Refund-like rows with negative amounts; the pipeline treats them as malformed.
    for m in 0..shape.malformed {
        records.push(TransactionRecord::new(
            shape.start,
            customer_id(m % shape.customers),
            -1.0,
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn shape(customers: usize, quarters: u32) -> SampleShape {
        SampleShape {
            customers,
            quarters,
            start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            malformed: 0,
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_transactions(shape(25, 4)).unwrap();
        let b = generate_transactions(shape(25, 4)).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_dates_stay_inside_requested_quarters() {
        let records = generate_transactions(shape(40, 6)).unwrap();
        let first = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        assert!(records.iter().all(|r| r.date >= first && r.date <= last));
        assert!(records.iter().all(|r| r.sales >= 0.0));
    }

    #[test]
    fn test_malformed_rows_are_appended() {
        let mut s = shape(5, 2);
        s.malformed = 3;
        let records = generate_transactions(s).unwrap();
        assert_eq!(records.iter().filter(|r| r.sales < 0.0).count(), 3);
    }

    #[rstest]
    #[case(0, 4)]
    #[case(10, 0)]
    fn test_empty_shape_is_rejected(#[case] customers: usize, #[case] quarters: u32) {
        assert!(matches!(
            generate_transactions(shape(customers, quarters)),
            Err(SampleError::EmptyShape { .. })
        ));
    }
}
