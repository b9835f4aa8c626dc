//! The commission policy and its resolution order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innsight_shared::EngineSettings;

use crate::costs::CommissionSettings;

/// Global fallback commission rate: 0.15.
const DEFAULT_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Channel names that never carry a commission. Guest-facing systems in
/// Spanish-speaking markets record direct bookings under the Spanish labels
/// as often as the English ones.
const DIRECT_CHANNELS: [&str; 9] = [
    "direct",
    "walk-in",
    "email",
    "website",
    "phone",
    "directo",
    "pagina web",
    "teléfono",
    "telefono",
];

fn default_channel_rates() -> Vec<(String, Decimal)> {
    [
        ("booking.com", Decimal::new(15, 2)),
        ("expedia", Decimal::new(18, 2)),
        ("airbnb", Decimal::new(14, 2)),
        ("agoda", Decimal::new(17, 2)),
        ("hotels.com", Decimal::new(18, 2)),
        ("despegar", Decimal::new(20, 2)),
        ("tripadvisor", Decimal::new(12, 2)),
        ("hostelworld", Decimal::new(12, 2)),
    ]
    .into_iter()
    .map(|(name, rate)| (name.to_string(), rate))
    .collect()
}

/// Commission policy: the direct-channel set, the known-channel rate table,
/// and the global fallback rate.
///
/// An explicit value rather than buried constants: deployments can re-rate
/// a channel through configuration and tests can substitute whole tables.
/// `Default` is the compiled-in policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionPolicy {
    /// Channel names treated as direct (zero commission). Matched
    /// case-insensitively after trimming.
    pub direct_channels: Vec<String>,
    /// Default rates for known channels, in match order. Matched
    /// tolerantly: a recorded source that contains a table name, or vice
    /// versa, hits that row.
    pub channel_rates: Vec<(String, Decimal)>,
    /// Rate applied when nothing else matches and the property has no
    /// default of its own.
    pub default_rate: Decimal,
}

impl Default for CommissionPolicy {
    fn default() -> Self {
        Self {
            direct_channels: DIRECT_CHANNELS.iter().map(ToString::to_string).collect(),
            channel_rates: default_channel_rates(),
            default_rate: DEFAULT_RATE,
        }
    }
}

impl CommissionPolicy {
    /// Builds the policy from deployment settings, keeping the compiled-in
    /// value for anything left unset.
    #[must_use]
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let mut policy = Self::default();
        if let Some(rate) = settings.default_commission_rate {
            policy.default_rate = rate;
        }
        if let Some(channels) = &settings.direct_channels {
            policy.direct_channels.clone_from(channels);
        }
        if let Some(rates) = &settings.channel_rates {
            let mut table: Vec<(String, Decimal)> =
                rates.iter().map(|(name, rate)| (name.clone(), *rate)).collect();
            // Configured tables arrive as a map; fix an order so tolerant
            // matching stays deterministic.
            table.sort_by(|a, b| a.0.cmp(&b.0));
            policy.channel_rates = table;
        }
        policy
    }

    /// Resolves the commission rate for a recorded booking channel.
    ///
    /// Resolution order, first match wins:
    /// 1. the direct-channel set (before overrides, so a misguided override
    ///    for a direct channel never reintroduces a commission),
    /// 2. the property's per-channel override (exact name, case-insensitive),
    /// 3. the policy's known-channel table (tolerant containment match),
    /// 4. the property default rate, else the policy default rate.
    #[must_use]
    pub fn resolve_rate(&self, channel: &str, settings: &CommissionSettings) -> Decimal {
        let normalized = normalize(channel);
        let fallback = settings.default_rate.unwrap_or(self.default_rate);

        if normalized.is_empty() {
            return fallback;
        }

        if self.is_direct(&normalized) {
            return Decimal::ZERO;
        }

        if let Some(rate) = settings
            .overrides
            .iter()
            .find(|(name, _)| normalize(name) == normalized)
            .map(|(_, rate)| *rate)
        {
            return rate;
        }

        if let Some(rate) = self.table_rate(&normalized) {
            return rate;
        }

        fallback
    }

    /// Returns true when the channel belongs to the direct set.
    #[must_use]
    pub fn is_direct(&self, channel: &str) -> bool {
        let normalized = normalize(channel);
        !normalized.is_empty()
            && self
                .direct_channels
                .iter()
                .any(|direct| normalize(direct) == normalized)
    }

    fn table_rate(&self, normalized: &str) -> Option<Decimal> {
        self.channel_rates
            .iter()
            .find(|(name, _)| {
                let name = normalize(name);
                normalized.contains(&name) || name.contains(normalized)
            })
            .map(|(_, rate)| *rate)
    }
}

fn normalize(channel: &str) -> String {
    channel.trim().to_lowercase()
}
