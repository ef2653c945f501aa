//! VAT-code inference for order lines.
//!
//! The API wants a single-letter VAT class per order line rather than an
//! amount, so the class is derived from the line's gross price and tax.

use serde::{Deserialize, Serialize};

/// VAT class of an order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatCode {
    /// 0%
    #[serde(rename = "N")]
    None,
    /// 9%
    #[serde(rename = "L")]
    Low,
    /// 21%
    #[serde(rename = "H")]
    High,
}

impl VatCode {
    /// Reference rates, ascending.
    pub const REFERENCE_RATES: [(f64, VatCode); 3] =
        [(0.0, VatCode::None), (9.0, VatCode::Low), (21.0, VatCode::High)];

    /// Infer the VAT class from a VAT-inclusive price and the VAT it contains.
    ///
    /// A zero tax or zero price is always [`VatCode::None`].
    pub fn infer(price_incl: f64, tax: f64) -> Self {
        if tax == 0.0 || price_incl == 0.0 {
            return VatCode::None;
        }
        let price_excl = price_incl - tax;
        VatCode::nearest(tax * 100.0 / price_excl)
    }

    /// The class whose reference rate is closest to `rate` (in percent).
    ///
    /// A rate exactly between two references resolves to the lower one.
    pub fn nearest(rate: f64) -> Self {
        if !rate.is_finite() {
            return VatCode::None;
        }

        let (_, mut best) = Self::REFERENCE_RATES[0];
        let mut best_distance = (Self::REFERENCE_RATES[0].0 - rate).abs();
        for (reference, code) in Self::REFERENCE_RATES.into_iter().skip(1) {
            let distance = (reference - rate).abs();
            if distance < best_distance {
                best = code;
                best_distance = distance;
            }
        }
        best
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VatCode::None => "N",
            VatCode::Low => "L",
            VatCode::High => "H",
        }
    }
}

impl std::fmt::Display for VatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_common_dutch_rates() {
        assert_eq!(VatCode::infer(100.0, 21.0), VatCode::High);
        assert_eq!(VatCode::infer(121.0, 21.0), VatCode::High);
        assert_eq!(VatCode::infer(100.0, 9.0), VatCode::Low);
        assert_eq!(VatCode::infer(109.0, 9.0), VatCode::Low);
    }

    #[test]
    fn zero_tax_or_price_is_none() {
        assert_eq!(VatCode::infer(100.0, 0.0), VatCode::None);
        assert_eq!(VatCode::infer(0.0, 0.0), VatCode::None);
        assert_eq!(VatCode::infer(0.0, 5.0), VatCode::None);
    }

    #[test]
    fn price_equal_to_tax_is_none() {
        assert_eq!(VatCode::infer(5.0, 5.0), VatCode::None);
    }

    #[test]
    fn discounts_keep_their_class() {
        assert_eq!(VatCode::infer(-12.1, -2.1), VatCode::High);
    }

    #[test]
    fn midpoints_resolve_to_the_lower_code() {
        assert_eq!(VatCode::nearest(4.5), VatCode::None);
        assert_eq!(VatCode::nearest(4.6), VatCode::Low);
        assert_eq!(VatCode::nearest(15.0), VatCode::Low);
        assert_eq!(VatCode::nearest(15.1), VatCode::High);
    }

    #[test]
    fn out_of_range_rates_snap_to_the_ends() {
        assert_eq!(VatCode::nearest(-3.0), VatCode::None);
        assert_eq!(VatCode::nearest(40.0), VatCode::High);
    }

    #[test]
    fn serializes_as_single_letter() {
        assert_eq!(serde_json::to_value(VatCode::Low).unwrap(), "L");
        assert_eq!(VatCode::High.to_string(), "H");
    }
}
