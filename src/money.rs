use crate::core::round2;
use rust_decimal::Decimal;
use rusty_money::{iso, Money};

/// Format an amount as Indian Rupees with lakh/crore grouping, e.g. `₹1,50,000.00`.
pub fn display_inr(amount: Decimal) -> String {
    Money::from_decimal(round2(amount), iso::INR).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn includes_rupee_symbol_and_digits() {
        assert_eq!(display_inr(dec!(150000)), "₹1,50,000.00");
        assert_eq!(display_inr(dec!(1234567.891)), "₹12,34,567.89");
    }

    #[test]
    fn keeps_paise() {
        assert_eq!(display_inr(dec!(12.5)), "₹12.50");
    }
}
