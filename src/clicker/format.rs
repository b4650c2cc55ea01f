//! Number formatting for the widget.

/// Floored with thousands separators (1234567.8 → "1,234,567").
pub fn format_count(n: f64) -> String {
    if !n.is_finite() || n <= 0.0 {
        return "0".to_string();
    }
    group_thousands(n.floor() as u64)
}

/// One decimal, separators on the integer part (1234.56 → "1,234.6").
pub fn format_rate(n: f64) -> String {
    if !n.is_finite() || n <= 0.0 {
        return "0".to_string();
    }
    let tenths = (n * 10.0).round() as u64;
    let int_part = group_thousands(tenths / 10);
    match tenths % 10 {
        0 => int_part,
        d => format!("{int_part}.{d}"),
    }
}

/// Short form for prices: "950", "12.5K", "1.3M", "4.0B", "2.2T".
pub fn format_compact(n: f64) -> String {
    const UNITS: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];
    if !n.is_finite() || n <= 0.0 {
        return "0".to_string();
    }
    for &(scale, suffix) in UNITS {
        if n >= scale * 10.0 || (n >= scale && scale > 1e3) {
            return format!("{:.1}{suffix}", n / scale);
        }
    }
    group_thousands(n.floor() as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
