use crate::error::NormalizationError;

/// Reduces a rendered price such as `£51.77` to `51.77`.
///
/// Everything outside `[0-9.]` is dropped first, which also discards a
/// currency symbol decoded with the wrong charset (`Â£51.77`).
pub fn normalize_price(raw: &str) -> Result<f64, NormalizationError> {
    let digits: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();

    digits
        .parse::<f64>()
        .map_err(|source| NormalizationError {
            raw: raw.to_owned(),
            source,
        })
}
