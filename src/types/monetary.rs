use crate::types::errors::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::AddAssign;
use std::str::FromStr;
use tracing::error;

const DECIMAL_PLACES: u32 = 2;

/// An exact base-10 money value.
///
/// Sums of `Amount` never drift, which keeps daily totals equal to the sum of
/// the individual transactions they were built from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new() -> Self {
        Amount(Decimal::ZERO)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds half to even at two fractional digits and pins the scale to two,
    /// so `25.5` and `25.50` compare and display identically.
    pub fn round_to_cents(self) -> Amount {
        let mut rounded = self.0.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven);
        rounded.rescale(DECIMAL_PLACES);
        Amount(rounded)
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }
}

impl AddAssign<Amount> for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        if let Some(new_val) = self.checked_add(rhs) {
            self.0 = new_val.0;
        } else {
            error!("Amount AddAssign error: Overflow")
        }
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.*}", DECIMAL_PLACES as usize, self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
        }

        if value.contains(['e', 'E']) {
            return Decimal::from_scientific(value)
                .map(Amount)
                .map_err(|error| AmountError::InvalidFormat(format!("Value has an invalid exponent form: {error}")));
        }

        Decimal::from_str(value)
            .map(Amount)
            .map_err(|error| AmountError::InvalidFormat(format!("Value is not a decimal number: {error}")))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
