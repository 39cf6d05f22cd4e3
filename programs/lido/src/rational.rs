use std::{convert::TryInto, fmt};

/// A ratio. Denom should not = 0
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rational {
    pub num: u64,
    pub denom: u64,
}

impl Rational {
    /// `floor(value * num / denom)`.
    ///
    /// The product is taken in u128 so it cannot overflow; returns None if
    /// denom is 0 or the quotient does not fit in a u64.
    pub fn floor_mul(&self, value: u64) -> Option<u64> {
        u128::from(value)
            .checked_mul(self.num.into())
            .and_then(|product| product.checked_div(self.denom.into()))
            .and_then(|result| result.try_into().ok())
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn zero_denom_is_none() {
        let r = Rational { num: 1, denom: 0 };
        assert_eq!(r.floor_mul(10), None);
    }

    #[test]
    fn floors() {
        let third = Rational { num: 1, denom: 3 };
        assert_eq!(third.floor_mul(100), Some(33));
        assert_eq!(format!("{}", third), "1/3");
    }

    proptest! {
        #[test]
        fn none_iff_quotient_exceeds_u64(value: u64, num: u64, denom in 1..=u64::MAX) {
            let exact = u128::from(value) * u128::from(num) / u128::from(denom);
            let result = Rational { num, denom }.floor_mul(value);
            if exact > u128::from(u64::MAX) {
                prop_assert_eq!(result, None);
            } else {
                prop_assert_eq!(result, Some(exact as u64));
            }
        }
    }
}
