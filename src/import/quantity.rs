use rust_decimal::Decimal;
use std::str::FromStr as _;

use crate::ledger::MAX_QUANTITY;

/// Lenient quantity parsing. Anything that isn't a number becomes zero, negative numbers are
/// clamped to zero and numbers above [MAX_QUANTITY] are capped.
pub fn coerce_quantity(content: &str) -> Decimal {
    let content = content.trim();
    let parsed = Decimal::from_str(content)
        .or_else(|_| Decimal::from_scientific(content))
        .unwrap_or(Decimal::ZERO);
    if parsed.is_sign_negative() {
        Decimal::ZERO
    } else {
        parsed.min(MAX_QUANTITY)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("6118.91", Decimal::new(611891, 2))]
    #[case(" 500 ", Decimal::new(500, 0))]
    #[case("0.5", Decimal::new(5, 1))]
    #[case("1e3", Decimal::new(1000, 0))]
    #[case("2.5E2", Decimal::new(250, 0))]
    #[case("abc", Decimal::ZERO)]
    #[case("", Decimal::ZERO)]
    #[case("NaN", Decimal::ZERO)]
    #[case("1,5", Decimal::ZERO)]
    #[case("-12.5", Decimal::ZERO)]
    #[case("1000000000000", MAX_QUANTITY)]
    #[case("1000000000000.01", MAX_QUANTITY)]
    #[case("79228162514264337593543950335", MAX_QUANTITY)]
    fn coerce(#[case] input: &str, #[case] expected: Decimal) {
        assert_eq!(expected, coerce_quantity(input));
    }
}
