//! Fare calculation

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    config::FareConfig,
    error::{AppError, AppResult},
    models::{Ticket, VehicleCategory},
};

const MINUTES_PER_HOUR: i64 = 60;

/// Prices completed stays from a fixed fare policy
#[derive(Debug, Clone)]
pub struct FareCalculator {
    config: FareConfig,
}

impl FareCalculator {
    pub fn new(config: FareConfig) -> Self {
        Self { config }
    }

    /// Price of a stay from `in_time` to `out_time`.
    ///
    /// Stays under the grace period cost nothing and never look at the
    /// category. Longer stays are billed per whole minute at the hourly
    /// rate of `category`, multiplied by the loyalty discount when
    /// `apply_discount` is set, then rounded half-up to cents.
    pub fn compute_fare(
        &self,
        in_time: DateTime<Utc>,
        out_time: Option<DateTime<Utc>>,
        category: VehicleCategory,
        apply_discount: bool,
    ) -> AppResult<Decimal> {
        let out = match out_time {
            Some(out) if out >= in_time => out,
            _ => return Err(AppError::InvalidInterval { out_time }),
        };

        let minutes = (out - in_time).num_minutes();
        if minutes < self.config.grace_period_minutes {
            return Ok(Decimal::ZERO);
        }

        let rate = self.hourly_rate(category)?;
        let discount = if apply_discount {
            self.config.loyalty_discount
        } else {
            Decimal::ONE
        };
        // minutes -> hours last, so the product stays exact
        let price = Decimal::from(minutes)
            .checked_mul(rate)
            .and_then(|price| price.checked_mul(discount))
            .and_then(|price| price.checked_div(Decimal::from(MINUTES_PER_HOUR)))
            .ok_or(AppError::FareOverflow(category))?;

        Ok(round_price(price))
    }

    /// Compute the fare of a closed ticket and store it on the ticket
    pub fn calculate_fare(&self, ticket: &mut Ticket, apply_discount: bool) -> AppResult<()> {
        ticket.price = self.compute_fare(
            ticket.in_time,
            ticket.out_time,
            ticket.spot.category,
            apply_discount,
        )?;
        Ok(())
    }

    /// Price multiplier for returning vehicles
    pub fn loyalty_discount(&self) -> Decimal {
        self.config.loyalty_discount
    }

    pub fn hourly_rate(&self, category: VehicleCategory) -> AppResult<Decimal> {
        self.config
            .rates
            .get(&category)
            .copied()
            .ok_or_else(|| AppError::UnsupportedCategory(category.to_string()))
    }
}

/// Round to 2 decimal places, half away from zero
pub fn round_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
