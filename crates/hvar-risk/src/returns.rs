//! Daily simple returns from closing prices.

use hvar_core::{InstrumentId, PricePoint, ReturnPoint, ReturnSeries};

/// Builds the chronological simple-return series of one instrument.
///
/// Price points may arrive in any order. They are stably sorted by
/// timestamp, so points sharing a timestamp keep their input order. For each
/// consecutive pair the return `close[i] / close[i-1] - 1` is stamped with
/// the later timestamp. A pair is dropped when either close is non-positive
/// or non-finite, so a bad print removes the two returns that touch it
/// rather than poisoning the series.
///
/// Points belonging to another instrument are ignored.
///
/// Zero or one usable price yields an empty series, which is a valid value.
///
/// # Example
///
/// ```rust
/// use hvar_core::{PricePoint, Timestamp};
/// use hvar_risk::build_return_series;
///
/// let t0 = Timestamp::from_ymd(2024, 1, 2).unwrap();
/// let prices = vec![
///     PricePoint::new("FPT", t0.add_days(1), 110.0),
///     PricePoint::new("FPT", t0, 100.0),
/// ];
///
/// let series = build_return_series("FPT", &prices);
/// assert_eq!(series.len(), 1);
/// assert!((series.to_values()[0] - 0.10).abs() < 1e-12);
/// ```
pub fn build_return_series(
    instrument_id: impl Into<InstrumentId>,
    prices: &[PricePoint],
) -> ReturnSeries {
    let instrument_id = instrument_id.into();

    let mut ordered: Vec<&PricePoint> = prices
        .iter()
        .filter(|p| p.instrument_id == instrument_id)
        .collect();

    let foreign = prices.len() - ordered.len();
    if foreign > 0 {
        log::warn!("{instrument_id}: ignoring {foreign} price points of other instruments");
    }

    ordered.sort_by_key(|p| p.timestamp);

    let points: Vec<ReturnPoint> = ordered
        .windows(2)
        .filter(|pair| pair[0].is_usable() && pair[1].is_usable())
        .map(|pair| ReturnPoint::new(pair[1].timestamp, pair[1].close / pair[0].close - 1.0))
        .filter(|r| r.value.is_finite())
        .collect();

    let dropped = ordered.len().saturating_sub(1) - points.len();
    if dropped > 0 {
        log::debug!("{instrument_id}: dropped {dropped} returns touching unusable prices");
    }

    ReturnSeries::new(instrument_id, points)
}
