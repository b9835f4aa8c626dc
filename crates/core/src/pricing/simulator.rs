//! Lowest viable nightly rate per channel.
//!
//! Deliberately lighter than the engine: it loads cost settings and the
//! property's booking history, nothing else. No period, no proration; the
//! question "what is the least I can charge" is not period-scoped.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innsight_shared::types::PropertyId;

use crate::commission::CommissionPolicy;
use crate::costs::{CostModel, CostSettings};
use crate::data::{PropertyStore, Reservation};
use crate::engine::EngineError;

/// Minimum viable rate for one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPrice {
    /// Channel name as recorded in the booking history.
    pub channel: String,
    /// Commission rate the channel resolves to.
    pub commission_rate: Decimal,
    /// Lowest nightly rate that still clears the target margin after
    /// commission. Zero when unachievable.
    pub minimum_rate: Decimal,
    /// False when the commission rate is 100% or more, where no finite
    /// rate can clear the margin.
    pub achievable: bool,
}

/// The full minimum-price picture for a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimumPriceQuote {
    /// Margin the quote was computed for, in percent over cost.
    pub target_margin_percent: Decimal,
    /// Cost of one occupied night: variable cost plus the fixed share of
    /// one room-day.
    pub base_cost_per_night: Decimal,
    /// Commission rate blended across the history's revenue mix.
    pub blended_commission_rate: Decimal,
    /// Minimum rate at the blended commission.
    pub blended_minimum_rate: Decimal,
    /// Per-channel minimums, highest-revenue channel first. A direct row
    /// is always present.
    pub channels: Vec<ChannelPrice>,
    /// Currency code from the cost settings.
    pub currency: String,
}

/// Stateless minimum-price calculations.
pub struct PricingService;

impl PricingService {
    /// Builds the quote from settings and the property's booking history.
    #[must_use]
    pub fn quote(
        settings: &CostSettings,
        reservations: &[Reservation],
        policy: &CommissionPolicy,
        target_margin_percent: Decimal,
    ) -> MinimumPriceQuote {
        let model = CostModel::resolve(settings);

        let active: Vec<&Reservation> = reservations.iter().filter(|r| r.is_active()).collect();

        let average_stay = if active.is_empty() {
            None
        } else {
            let nights: i64 = active.iter().map(|r| r.stay_nights()).sum();
            Some(Decimal::from(nights) / Decimal::from(active.len()))
        };
        let base_cost = model.variable_per_night(average_stay) + model.fixed_per_room_day();

        // Channel mix from history, deduplicated case-insensitively but
        // displayed as first recorded.
        let mut mix: BTreeMap<String, (String, Decimal)> = BTreeMap::new();
        for reservation in &active {
            let key = reservation.source.trim().to_lowercase();
            if key.is_empty() {
                continue;
            }
            let entry = mix
                .entry(key)
                .or_insert_with(|| (reservation.source.trim().to_string(), Decimal::ZERO));
            entry.1 += reservation.room_revenue_total;
        }
        if !mix.values().any(|(name, _)| policy.is_direct(name)) {
            mix.insert("direct".to_string(), ("direct".to_string(), Decimal::ZERO));
        }

        let margin_multiplier =
            (Decimal::ONE + target_margin_percent / Decimal::ONE_HUNDRED).max(Decimal::ZERO);

        let mut weighted_rate = Decimal::ZERO;
        let mut total_revenue = Decimal::ZERO;
        let mut channels: Vec<(ChannelPrice, Decimal)> = mix
            .into_values()
            .map(|(name, revenue)| {
                let rate = policy.resolve_rate(&name, &settings.commissions);
                weighted_rate += rate * revenue;
                total_revenue += revenue;
                (
                    Self::channel_price(name, rate, base_cost, margin_multiplier),
                    revenue,
                )
            })
            .collect();
        channels.sort_by(|a, b| b.1.cmp(&a.1));

        let blended_commission_rate = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            (weighted_rate / total_revenue).round_dp(4)
        };
        let blended =
            Self::channel_price(String::new(), blended_commission_rate, base_cost, margin_multiplier);

        MinimumPriceQuote {
            target_margin_percent,
            base_cost_per_night: base_cost.round_dp(2),
            blended_commission_rate,
            blended_minimum_rate: blended.minimum_rate,
            channels: channels.into_iter().map(|(price, _)| price).collect(),
            currency: settings.currency.clone(),
        }
    }

    fn channel_price(
        channel: String,
        rate: Decimal,
        base_cost: Decimal,
        margin_multiplier: Decimal,
    ) -> ChannelPrice {
        // A commission of 100% or more swallows any price; report the row
        // as unachievable instead of dividing by zero or worse.
        if rate >= Decimal::ONE {
            return ChannelPrice {
                channel,
                commission_rate: rate,
                minimum_rate: Decimal::ZERO,
                achievable: false,
            };
        }
        let minimum = base_cost * margin_multiplier / (Decimal::ONE - rate);
        ChannelPrice {
            channel,
            commission_rate: rate,
            minimum_rate: minimum.round_dp(2),
            achievable: true,
        }
    }
}

/// Quotes minimum prices for a property under the default commission
/// policy.
///
/// Loads only cost settings and the reservation history; missing settings
/// degrade to the all-zero cost model rather than failing.
pub async fn calculate_minimum_price<S: PropertyStore>(
    store: &S,
    property: PropertyId,
    target_margin_percent: Decimal,
) -> Result<MinimumPriceQuote, EngineError> {
    let (settings, reservations) = tokio::try_join!(
        store.cost_settings(property),
        store.property_reservations(property),
    )?;
    let settings = settings.unwrap_or_default();
    Ok(PricingService::quote(
        &settings,
        &reservations,
        &CommissionPolicy::default(),
        target_margin_percent,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::costs::{FixedCosts, VariableCosts};
    use crate::data::{MemoryStore, ReservationStatus};
    use chrono::{Duration, NaiveDate, Utc};
    use innsight_shared::types::ReservationId;
    use rust_decimal_macros::dec;

    fn make_settings(room_count: u32, fixed_monthly: Decimal) -> CostSettings {
        CostSettings {
            room_count,
            fixed: FixedCosts::Legacy {
                salaries: Decimal::ZERO,
                rent: fixed_monthly,
                utilities: Decimal::ZERO,
                other: Decimal::ZERO,
            },
            variable: VariableCosts::Legacy {
                cleaning_per_stay: Decimal::ZERO,
                laundry: Decimal::ZERO,
                amenities: Decimal::ZERO,
            },
            ..CostSettings::default()
        }
    }

    fn make_reservation(source: &str, nights: i64, revenue: Decimal) -> Reservation {
        let check_in = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        Reservation {
            id: ReservationId::new(),
            property_id: PropertyId::new(),
            guest_name: "Guest".into(),
            check_in,
            check_out: check_in + Duration::days(nights),
            status: ReservationStatus::CheckedOut,
            room_nights: nights,
            room_revenue_total: revenue,
            taxes_total: Decimal::ZERO,
            paid_amount: revenue,
            balance_due: Decimal::ZERO,
            source: source.into(),
            source_category: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_minimum_rate_formula() {
        // 3044/month over one room resolves to a base cost of 100/night.
        let settings = make_settings(1, dec!(3044));
        let history = vec![make_reservation("Booking.com", 3, dec!(450))];

        let quote = PricingService::quote(
            &settings,
            &history,
            &CommissionPolicy::default(),
            dec!(20),
        );

        assert_eq!(quote.base_cost_per_night, dec!(100.00));
        let booking = quote
            .channels
            .iter()
            .find(|c| c.channel == "Booking.com")
            .unwrap();
        assert_eq!(booking.commission_rate, dec!(0.15));
        // 100 * 1.20 / (1 - 0.15)
        assert_eq!(booking.minimum_rate, dec!(141.18));
        assert!(booking.achievable);
    }

    #[test]
    fn test_direct_row_is_always_present() {
        let settings = make_settings(1, dec!(3044));
        let quote = PricingService::quote(
            &settings,
            &[],
            &CommissionPolicy::default(),
            dec!(20),
        );

        assert_eq!(quote.channels.len(), 1);
        let direct = &quote.channels[0];
        assert_eq!(direct.channel, "direct");
        assert_eq!(direct.commission_rate, Decimal::ZERO);
        assert_eq!(direct.minimum_rate, dec!(120.00));
        assert_eq!(quote.blended_commission_rate, Decimal::ZERO);
    }

    #[test]
    fn test_channels_deduplicate_case_insensitively() {
        let settings = make_settings(1, dec!(3044));
        let history = vec![
            make_reservation("Booking.com", 2, dec!(200)),
            make_reservation("BOOKING.COM", 2, dec!(300)),
            make_reservation("walk-in", 1, dec!(80)),
        ];

        let quote = PricingService::quote(
            &settings,
            &history,
            &CommissionPolicy::default(),
            dec!(10),
        );

        assert_eq!(quote.channels.len(), 2);
        // Highest-revenue channel first; the casing of the first record wins.
        assert_eq!(quote.channels[0].channel, "Booking.com");
        assert_eq!(quote.channels[1].channel, "walk-in");
        assert_eq!(quote.channels[1].commission_rate, Decimal::ZERO);
    }

    #[test]
    fn test_blended_rate_is_revenue_weighted() {
        let settings = make_settings(1, dec!(3044));
        // 300 of booking.com at 15%, 100 of direct at 0%.
        let history = vec![
            make_reservation("Booking.com", 3, dec!(300)),
            make_reservation("direct", 1, dec!(100)),
        ];

        let quote = PricingService::quote(
            &settings,
            &history,
            &CommissionPolicy::default(),
            dec!(0),
        );

        // (0.15 * 300 + 0 * 100) / 400
        assert_eq!(quote.blended_commission_rate, dec!(0.1125));
    }

    #[test]
    fn test_full_commission_is_unachievable() {
        let mut settings = make_settings(1, dec!(3044));
        settings
            .commissions
            .overrides
            .insert("predatoryota".into(), dec!(1.00));
        let history = vec![make_reservation("PredatoryOTA", 2, dec!(200))];

        let quote = PricingService::quote(
            &settings,
            &history,
            &CommissionPolicy::default(),
            dec!(20),
        );

        let row = quote
            .channels
            .iter()
            .find(|c| c.channel == "PredatoryOTA")
            .unwrap();
        assert!(!row.achievable);
        assert_eq!(row.minimum_rate, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_standalone_quote_without_settings_degrades() {
        let property = PropertyId::new();
        let store = MemoryStore::new().with_property(property);

        let quote = calculate_minimum_price(&store, property, dec!(25))
            .await
            .unwrap();
        assert_eq!(quote.base_cost_per_night, Decimal::ZERO);
        assert_eq!(quote.channels.len(), 1);
        assert_eq!(quote.channels[0].minimum_rate, Decimal::ZERO);
    }
}
