/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole dollars with thousands separators, e.g. `$123,457`.
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let rounded = value.abs().round() as u64;
    let sign = if value < 0.0 && rounded > 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded))
}

pub fn format_count(n: usize) -> String {
    group_thousands(n as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn dollars() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(123456.6), "$123,457");
        assert_eq!(format_usd(-1500.0), "-$1,500");
        assert_eq!(format_usd(f64::NAN), "-");
    }

    #[test]
    fn counts() {
        assert_eq!(format_count(12_345), "12,345");
    }
}
