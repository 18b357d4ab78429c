use rust_decimal::Decimal;

use crate::models::{
    minifigure::{Minifigure, MinifigureView},
    price::UsedPriceComparison,
};

/// Compare a record's current used price with the used price that was in
/// effect before its latest history entry.
///
/// Without history the record is compared with itself. Records with no
/// "Current value" at all get the empty, unchanged comparison.
pub fn used_price_comparison(record: &Minifigure) -> UsedPriceComparison {
    let Some(current_value) = &record.current_value else {
        return UsedPriceComparison::default();
    };

    let current_used_price = current_value.used_or_zero();
    let last_used_price = record
        .price_history
        .last()
        .map(|entry| entry.used_price_old)
        .unwrap_or(current_used_price);

    // Direction comes from the exact difference; only the reported amount is rounded
    let difference = current_used_price - last_used_price;

    UsedPriceComparison {
        last_used_price: Some(last_used_price),
        current_used_price: Some(current_used_price),
        difference: Some(difference.round_dp(2)),
        increase: difference > Decimal::ZERO,
        decrease: difference < Decimal::ZERO,
        unchanged: difference == Decimal::ZERO,
    }
}

/// Attach the comparison to each record. Pure; nothing is persisted.
pub fn with_comparisons(records: Vec<Minifigure>) -> Vec<MinifigureView> {
    records
        .into_iter()
        .map(|minifigure| {
            let comparison = used_price_comparison(&minifigure);
            MinifigureView {
                minifigure,
                comparison,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::price::{CurrentValue, PriceChange};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn entry(used_price_old: Decimal) -> PriceChange {
        PriceChange {
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            new_price_old: dec!(0),
            used_price_old,
            new_price_diff: false,
            new_price_diff_amount: dec!(0),
            used_price_diff: true,
            used_price_diff_amount: dec!(0),
        }
    }

    fn record(used: Option<Decimal>, history: Vec<PriceChange>) -> Minifigure {
        let mut fig = Minifigure::new("sw0001");
        fig.current_value = Some(CurrentValue::new(None, used));
        fig.price_history = history;
        fig
    }

    fn exactly_one(c: &UsedPriceComparison) -> bool {
        [c.increase, c.decrease, c.unchanged].iter().filter(|b| **b).count() == 1
    }

    #[test]
    fn test_increase() {
        let c = used_price_comparison(&record(Some(dec!(7.50)), vec![entry(dec!(5.00))]));

        assert_eq!(c.last_used_price, Some(dec!(5.00)));
        assert_eq!(c.current_used_price, Some(dec!(7.50)));
        assert_eq!(c.difference, Some(dec!(2.50)));
        assert!(c.increase);
        assert!(exactly_one(&c));
    }

    #[test]
    fn test_decrease_uses_latest_entry() {
        let c = used_price_comparison(&record(
            Some(dec!(4.00)),
            vec![entry(dec!(1.00)), entry(dec!(6.25))],
        ));

        assert_eq!(c.difference, Some(dec!(-2.25)));
        assert!(c.decrease);
        assert!(exactly_one(&c));
    }

    #[test]
    fn test_sub_cent_move_keeps_direction() {
        let up = used_price_comparison(&record(Some(dec!(5.004)), vec![entry(dec!(5.00))]));
        let down = used_price_comparison(&record(Some(dec!(4.996)), vec![entry(dec!(5.00))]));

        assert!(up.increase);
        assert_eq!(up.difference, Some(dec!(0.00)));
        assert!(down.decrease);
        assert_eq!(down.difference, Some(dec!(0.00)));
        assert!(exactly_one(&up) && exactly_one(&down));
    }

    #[test]
    fn test_no_history_is_unchanged() {
        let c = used_price_comparison(&record(Some(dec!(4.00)), vec![]));

        assert_eq!(c.last_used_price, Some(dec!(4.00)));
        assert_eq!(c.difference, Some(dec!(0)));
        assert!(c.unchanged);
        assert!(exactly_one(&c));
    }

    #[test]
    fn test_missing_used_price_counts_as_zero() {
        let c = used_price_comparison(&record(None, vec![entry(dec!(3.00))]));

        assert_eq!(c.current_used_price, Some(dec!(0)));
        assert_eq!(c.difference, Some(dec!(-3.00)));
        assert!(c.decrease);
    }

    #[test]
    fn test_no_current_value() {
        let c = used_price_comparison(&Minifigure::new("sw0001"));

        assert_eq!(c, UsedPriceComparison::default());
        assert!(c.unchanged);
        assert!(exactly_one(&c));
    }

    #[test]
    fn test_with_comparisons_keeps_order() {
        let views = with_comparisons(vec![Minifigure::new("a"), Minifigure::new("b")]);
        let ids: Vec<_> = views.iter().map(|v| v.minifigure.id()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
    }
}
