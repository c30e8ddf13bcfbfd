//! Display formatting for XAF amounts.

/// Formats `amount` as `"12 500 FCFA"`: thousands grouped by a plain space,
/// no decimals (XAF has no minor unit).
#[must_use]
pub fn format_xaf(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 5);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped.push_str(" FCFA");
    grouped
}

#[cfg(test)]
mod tests {
    use super::format_xaf;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_xaf(0), "0 FCFA");
        assert_eq!(format_xaf(999), "999 FCFA");
        assert_eq!(format_xaf(1000), "1 000 FCFA");
        assert_eq!(format_xaf(12_500), "12 500 FCFA");
        assert_eq!(format_xaf(1_234_567), "1 234 567 FCFA");
    }
}
