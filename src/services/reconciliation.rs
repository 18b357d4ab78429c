use chrono::NaiveDate;

use crate::models::{
    minifigure::Minifigure,
    price::{CurrentValue, PriceChange},
};

/// Compare fetched prices with the stored ones.
///
/// Missing prices on either side count as zero. Returns `None` when
/// neither the new nor the used price moved, otherwise the history entry
/// describing the move, dated `date`.
pub fn detect_price_change(
    stored: Option<&CurrentValue>,
    fetched: &CurrentValue,
    date: NaiveDate,
) -> Option<PriceChange> {
    let stored = stored.cloned().unwrap_or_default();

    let new_price_old = stored.new_or_zero();
    let used_price_old = stored.used_or_zero();
    let new_price = fetched.new_or_zero();
    let used_price = fetched.used_or_zero();

    let new_price_diff = new_price != new_price_old;
    let used_price_diff = used_price != used_price_old;

    if !new_price_diff && !used_price_diff {
        return None;
    }

    Some(PriceChange {
        date,
        new_price_old,
        used_price_old,
        new_price_diff,
        new_price_diff_amount: (new_price - new_price_old).round_dp(2),
        used_price_diff,
        used_price_diff_amount: (used_price - used_price_old).round_dp(2),
    })
}

/// Merge freshly fetched prices into a record.
///
/// When a price moved, any history entry already dated `date` is replaced
/// by the new one and both current prices are overwritten with the fetched
/// pair. When nothing moved the record is left untouched and `None` is
/// returned.
pub fn apply_fetched_prices(
    record: &mut Minifigure,
    fetched: CurrentValue,
    date: NaiveDate,
) -> Option<PriceChange> {
    let change = detect_price_change(record.current_value.as_ref(), &fetched, date)?;

    record.price_history.retain(|entry| entry.date != date);
    record.price_history.push(change.clone());
    record.current_value = Some(fetched);

    Some(change)
}
