//! Price computation — the single source of truth for order pricing.
//!
//! One authoritative function computes the expected price for a plan; the
//! webhook crate calls it to check an incoming order's `price_cents`
//! against that value, and any external client-side estimate can be
//! verified against it without duplicating the formula.

use chrono::NaiveDate;

use crate::model::derived::Tier;

const BASE_PRICE_CENTS: u32 = 14900;
const PER_WEEK_CENTS: u32 = 300;

/// Per-week rate, the cap, and the minimum plan length used by the
/// race-date-driven price quote a storefront shows before checkout.
pub const PRICE_PER_WEEK_CENTS: u32 = 1500;
pub const PRICE_CAP_CENTS: u32 = 24900;
pub const MIN_WEEKS: u32 = 4;

/// Quotes a plan's price purely from how many weeks away the race is,
/// independent of tier — the "client and server must agree" function named
/// in the price-computation-parity testable property. `weeks` from a race
/// date less than `MIN_WEEKS` away, or in the past, floors to `MIN_WEEKS`;
/// the quote is capped at `PRICE_CAP_CENTS` regardless of how far out the
/// race is.
pub fn price_cents_for_race_date(race_date: NaiveDate, today: NaiveDate) -> (u32, u32) {
    let days_until = (race_date - today).num_days();
    let weeks = if days_until <= 0 {
        MIN_WEEKS
    } else {
        (((days_until as f64) / 7.0).ceil() as u32).max(MIN_WEEKS)
    };
    let price_cents = (weeks * PRICE_PER_WEEK_CENTS).min(PRICE_CAP_CENTS);
    (weeks, price_cents)
}

pub fn price_cents_for_plan(weeks: u32, tier: Tier) -> u32 {
    let tier_multiplier_percent: u32 = match tier {
        Tier::Ayahuasca => 100,
        Tier::Finisher => 110,
        Tier::Compete => 125,
        Tier::Podium => 150,
    };
    let base = BASE_PRICE_CENTS + weeks * PER_WEEK_CENTS;
    base * tier_multiplier_percent / 100
}

pub fn price_cents_for_coaching_month() -> u32 {
    29900
}

pub fn price_cents_for_consulting_hour() -> u32 {
    19900
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_scales_with_weeks_and_tier() {
        let finisher_12 = price_cents_for_plan(12, Tier::Finisher);
        let podium_12 = price_cents_for_plan(12, Tier::Podium);
        assert!(podium_12 > finisher_12);

        let finisher_6 = price_cents_for_plan(6, Tier::Finisher);
        assert!(finisher_12 > finisher_6);
    }

    #[test]
    fn price_is_pure_and_deterministic() {
        assert_eq!(
            price_cents_for_plan(12, Tier::Compete),
            price_cents_for_plan(12, Tier::Compete)
        );
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn eight_weeks_out_prices_at_rate() {
        let today = d(2026, 1, 1);
        let race = today + chrono::Duration::weeks(8);
        assert_eq!(price_cents_for_race_date(race, today), (8, 8 * PRICE_PER_WEEK_CENTS));
    }

    #[test]
    fn short_plan_floors_to_minimum_weeks() {
        let today = d(2026, 1, 1);
        let race = today + chrono::Duration::weeks(1);
        assert_eq!(price_cents_for_race_date(race, today), (MIN_WEEKS, 6000));
    }

    #[test]
    fn long_plan_caps_at_249() {
        let today = d(2026, 1, 1);
        let race = today + chrono::Duration::weeks(30);
        let (weeks, price) = price_cents_for_race_date(race, today);
        assert!(weeks >= 30);
        assert_eq!(price, PRICE_CAP_CENTS);
    }

    #[test]
    fn seventeen_weeks_crosses_the_cap_boundary() {
        let today = d(2026, 1, 1);
        let (_, price16) = price_cents_for_race_date(today + chrono::Duration::weeks(16), today);
        assert_eq!(price16, 16 * PRICE_PER_WEEK_CENTS);
        let (_, price17) = price_cents_for_race_date(today + chrono::Duration::weeks(17), today);
        assert_eq!(price17, PRICE_CAP_CENTS);
    }

    #[test]
    fn past_race_date_floors_to_minimum() {
        let today = d(2026, 1, 1);
        let race = today - chrono::Duration::weeks(2);
        assert_eq!(price_cents_for_race_date(race, today), (MIN_WEEKS, 6000));
    }
}
