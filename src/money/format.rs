//! Price formatting

use std::fmt;

use serde::{Deserialize, Serialize};

struct CurrencyFormat {
    symbol: &'static str,
    decimals: usize,
}

fn lookup(code: &str) -> Option<CurrencyFormat> {
    let (symbol, decimals) = match code {
        "USD" => ("$", 2),
        "EUR" => ("€", 2),
        "GBP" => ("£", 2),
        "NGN" => ("₦", 2),
        "GHS" => ("GH₵", 2),
        "KES" => ("KSh", 2),
        "ZAR" => ("R", 2),
        "CAD" => ("CA$", 2),
        "AUD" => ("A$", 2),
        "INR" => ("₹", 2),
        "JPY" => ("¥", 0),
        "KRW" => ("₩", 0),
        _ => return None,
    };
    Some(CurrencyFormat { symbol, decimals })
}

/// Symbol for a currency code, if it has one
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    lookup(&code.trim().to_ascii_uppercase()).map(|f| f.symbol)
}

/// Render an amount with its currency.
///
/// Known codes get their symbol, unknown codes are written out in front of
/// the number and a missing code falls back to the generic sign `¤`. The
/// result always carries a currency indicator.
pub fn format_price(amount: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let amount = if amount.is_finite() { amount } else { 0.0 };

    let (prefix, decimals) = match lookup(&code) {
        Some(format) => (format.symbol.to_string(), format.decimals),
        None if code.is_empty() => ("¤".to_string(), 2),
        None => (format!("{} ", code), 2),
    };

    let number = group_thousands(&format!("{:.*}", decimals, amount.abs()));
    let negative = amount < 0.0 && number.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    format!("{}{}{}", sign, prefix, number)
}

fn group_thousands(fixed: &str) -> String {
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

/// An amount paired with its currency; the pair is never split for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub amount: f64,
    pub currency: String,
}

impl Money {
    pub fn new(amount: f64, currency: &str) -> Self {
        Self {
            amount,
            currency: currency.trim().to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_price(self.amount, &self.currency))
    }
}
