//! Bounded meters tracking the player's simulated performance.
//!
//! Every meter holds an integer in `[METER_MIN, METER_MAX]`. Updates clamp,
//! so applying `+d` then `-d` does not necessarily return to the starting
//! value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound of every meter.
pub const METER_MIN: i32 = 0;

/// Upper bound of every meter.
pub const METER_MAX: i32 = 100;

/// Value every meter starts from on a fresh run.
pub const METER_INITIAL: i32 = 50;

/// One simulated dimension of player performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meter {
    /// Customer satisfaction.
    Customer,
    /// Teamwork.
    Team,
    /// Learning and growth.
    Growth,
}

impl Meter {
    /// All meters, in display order.
    pub const ALL: [Meter; 3] = [Meter::Customer, Meter::Team, Meter::Growth];

    /// Wire name used in content and telemetry.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Meter::Customer => "customer",
            Meter::Team => "team",
            Meter::Growth => "growth",
        }
    }

    /// Parses a wire name. Unknown names yield `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Meter::ALL.into_iter().find(|meter| meter.as_str() == name)
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn clamp(value: i32) -> i32 {
    value.clamp(METER_MIN, METER_MAX)
}

/// Current value of every meter. All three are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawMeters")]
pub struct Meters {
    customer: i32,
    team: i32,
    growth: i32,
}

#[derive(Deserialize)]
struct RawMeters {
    customer: i32,
    team: i32,
    growth: i32,
}

impl From<RawMeters> for Meters {
    fn from(raw: RawMeters) -> Self {
        Meters::new(raw.customer, raw.team, raw.growth)
    }
}

impl Default for Meters {
    fn default() -> Self {
        Self::initial()
    }
}

impl Meters {
    /// Builds a meter set, clamping each value into range.
    #[must_use]
    pub fn new(customer: i32, team: i32, growth: i32) -> Self {
        Self {
            customer: clamp(customer),
            team: clamp(team),
            growth: clamp(growth),
        }
    }

    /// The starting meters of every run.
    #[must_use]
    pub fn initial() -> Self {
        Self::new(METER_INITIAL, METER_INITIAL, METER_INITIAL)
    }

    /// Returns the value of `meter`.
    #[must_use]
    pub fn get(&self, meter: Meter) -> i32 {
        match meter {
            Meter::Customer => self.customer,
            Meter::Team => self.team,
            Meter::Growth => self.growth,
        }
    }

    /// Sum of all meters, reported as the final score.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.customer + self.team + self.growth
    }

    /// Returns a copy with `delta` added to `meter`, clamped into range.
    #[must_use]
    pub fn with_delta(&self, meter: Meter, delta: i32) -> Self {
        let mut next = *self;
        let value = clamp(self.get(meter).saturating_add(delta));
        match meter {
            Meter::Customer => next.customer = value,
            Meter::Team => next.team = value,
            Meter::Growth => next.growth = value,
        }
        next
    }

    /// Applies every delta in `effect`, once per meter key present.
    #[must_use]
    pub fn apply_effect(&self, effect: &Effect) -> Self {
        effect
            .iter()
            .fold(*self, |meters, (meter, delta)| meters.with_delta(meter, delta))
    }

    /// Iterates `(meter, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Meter, i32)> + '_ {
        Meter::ALL.into_iter().map(|meter| (meter, self.get(meter)))
    }
}

/// Adds `delta` to one meter and clamps the result into `[0, 100]`.
///
/// Pure: `meters` is left untouched.
#[must_use]
pub fn apply_delta(meters: &Meters, meter: Meter, delta: i32) -> Meters {
    meters.with_delta(meter, delta)
}

/// Partial mapping from meter to a signed delta.
///
/// Authored content is deserialized leniently: integers are taken as-is,
/// finite floats are rounded, numeric strings are parsed and anything else
/// contributes zero. Unknown meter names are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, LenientDelta>")]
pub struct Effect(BTreeMap<Meter, i32>);

impl Effect {
    /// An effect that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper setting the delta for `meter`.
    #[must_use]
    pub fn with(mut self, meter: Meter, delta: i32) -> Self {
        self.0.insert(meter, delta);
        self
    }

    /// Delta for `meter`, if the effect mentions it.
    #[must_use]
    pub fn get(&self, meter: Meter) -> Option<i32> {
        self.0.get(&meter).copied()
    }

    /// Returns `true` when no meter is mentioned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(meter, delta)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Meter, i32)> + '_ {
        self.0.iter().map(|(meter, delta)| (*meter, *delta))
    }
}

impl FromIterator<(Meter, i32)> for Effect {
    fn from_iter<T: IntoIterator<Item = (Meter, i32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<String, LenientDelta>> for Effect {
    fn from(raw: BTreeMap<String, LenientDelta>) -> Self {
        raw.into_iter()
            .filter_map(|(name, delta)| Meter::parse(&name).map(|meter| (meter, delta.value())))
            .collect()
    }
}

/// A delta as authored, before coercion to an integer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum LenientDelta {
    /// Plain integer.
    Integer(i64),
    /// Any other JSON/YAML number.
    Float(f64),
    /// Text that may hold a number.
    Text(String),
    /// Anything else.
    Other(serde::de::IgnoredAny),
}

fn saturate_i64(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

#[allow(clippy::cast_possible_truncation)]
fn saturate_f64(value: f64) -> i32 {
    if value.is_finite() {
        value
            .round()
            .clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
    } else {
        0
    }
}

impl LenientDelta {
    /// Coerces the authored value to an integer delta; unparseable input is 0.
    #[must_use]
    pub fn value(&self) -> i32 {
        match self {
            LenientDelta::Integer(value) => saturate_i64(*value),
            LenientDelta::Float(value) => saturate_f64(*value),
            LenientDelta::Text(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .map(saturate_i64)
                    .or_else(|_| text.parse::<f64>().map(saturate_f64))
                    .unwrap_or(0)
            }
            LenientDelta::Other(_) => 0,
        }
    }
}
