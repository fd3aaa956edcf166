//! # Currency Formatting
//!
//! Display-time formatting of money amounts. The engine never rounds; this is
//! the only place amounts are cut to a fixed number of decimals.
//!
//! ```rust
//! use estimate_core::currency::CurrencyStyle;
//!
//! let php = CurrencyStyle::default();
//! assert_eq!(php.format(1234.5), "₱1,234.50");
//! assert_eq!(php.format(-200.0), "-₱200.00");
//! ```

use serde::{Deserialize, Serialize};

/// How to print money: ISO code, symbol, digits after the decimal point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyStyle {
    pub code: String,
    pub symbol: String,
    pub decimals: usize,
}

impl Default for CurrencyStyle {
    fn default() -> Self {
        CurrencyStyle {
            code: "PHP".to_string(),
            symbol: "₱".to_string(),
            decimals: 2,
        }
    }
}

impl CurrencyStyle {
    /// Format `amount` with the symbol, comma thousands separators and a
    /// leading minus for negative values.
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let (whole, fraction) = match fixed.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + self.symbol.len() + 4);
        // "-0.00" is printed without the sign
        if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(whole));
        if let Some(fraction) = fraction {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
