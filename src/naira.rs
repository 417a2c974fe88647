use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Format a Naira amount with sign, thousands separators and 2 dp
pub fn format_naira(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded < Decimal::ZERO;
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), format!("{:0<2}", frac_part)),
        None => (text, "00".to_string()),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}\u{20A6}{}.{}", sign, grouped, frac_part)
}

/// Format a percentage to 2 dp, e.g. "5.40%"
pub fn format_percent(rate: Decimal) -> String {
    format!("{:.2}%", rate.round_dp(2))
}

/// Format a marginal rate fraction as a whole percentage, e.g. "7%"
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * dec!(100)).normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_amounts() {
        assert_eq!(format_naira(dec!(0)), "\u{20A6}0.00");
        assert_eq!(format_naira(dec!(300)), "\u{20A6}300.00");
        assert_eq!(format_naira(dec!(21000)), "\u{20A6}21,000.00");
        assert_eq!(format_naira(dec!(1000000)), "\u{20A6}1,000,000.00");
    }

    #[test]
    fn formats_fractional_amounts() {
        assert_eq!(format_naira(dec!(4500.5)), "\u{20A6}4,500.50");
        assert_eq!(format_naira(dec!(1234.567)), "\u{20A6}1,234.57");
    }

    #[test]
    fn formats_negative_amounts() {
        assert_eq!(format_naira(dec!(-946000)), "-\u{20A6}946,000.00");
    }

    #[test]
    fn formats_percentages() {
        assert_eq!(format_percent(dec!(5.4)), "5.40%");
        assert_eq!(format_percent(dec!(0)), "0.00%");
    }

    #[test]
    fn formats_marginal_rates() {
        assert_eq!(format_rate(dec!(0.07)), "7%");
        assert_eq!(format_rate(dec!(0.21)), "21%");
    }
}
