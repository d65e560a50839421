use std::str::FromStr;

use error_stack::{Report, ResultExt};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Exact decimal price. Floating point input is converted once, at the
/// boundary, and never stored.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct BookPrice(Decimal);

impl BookPrice {
    pub fn new(price: impl Into<Decimal>) -> Self {
        Self(price.into())
    }
}

impl Default for BookPrice {
    fn default() -> Self {
        Self(Decimal::ZERO)
    }
}

impl TryFrom<f64> for BookPrice {
    type Error = Report<KernelError>;

    // The shortest representation that round-trips the float, so 19.99 stays 19.99.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(Report::new(KernelError::Validation)
                .attach_printable(format!("Price must be a finite number: {value}")));
        }
        let decimal = Decimal::from_str(&value.to_string())
            .change_context(KernelError::Validation)
            .attach_printable_lazy(|| format!("Price is out of range: {value}"))?;
        Ok(Self(decimal))
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::BookPrice;
    use crate::KernelError;

    #[test]
    fn float_converts_to_shortest_decimal() {
        let price = BookPrice::try_from(19.99_f64).unwrap();
        assert_eq!(price.as_ref(), &Decimal::from_str("19.99").unwrap());

        let price = BookPrice::try_from(0.1_f64).unwrap();
        assert_eq!(price.as_ref(), &Decimal::from_str("0.1").unwrap());
    }

    #[test]
    fn non_finite_float_is_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let error = BookPrice::try_from(value).unwrap_err();
            assert_eq!(error.current_context(), &KernelError::Validation);
        }
    }

    #[test]
    fn default_price_is_zero() {
        assert_eq!(BookPrice::default().as_ref(), &Decimal::ZERO);
    }
}
