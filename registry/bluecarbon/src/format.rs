//! Display formatting for credit counts and areas.

/// `12500` → `12,500`.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Hectares with grouping; fractional parts are kept to one decimal when present.
pub fn hectares(area: f64) -> String {
    if area.fract() == 0.0 && area >= 0.0 && area < u64::MAX as f64 {
        return thousands(area as u64);
    }
    let rounded = format!("{area:.1}");
    if let Some((whole, frac)) = rounded.split_once('.') {
        if let Ok(whole) = whole.parse::<u64>() {
            return format!("{}.{frac}", thousands(whole));
        }
    }
    rounded
}
