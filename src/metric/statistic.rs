//! Statistic keywords for metric aggregation.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// The aggregation applied to raw data points within a period.
///
/// The recognized aggregation keywords are enumerated; percentile and
/// trimmed-statistic expression strings (`p99`, `tm(10%:90%)`, …) travel
/// through [`Statistic::Custom`] uninterpreted — their grammar is validated by
/// the consuming service, not by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statistic {
    Average,
    Sum,
    Minimum,
    Maximum,
    SampleCount,
    /// Interquartile mean, the trimmed mean over the 25%–75% range.
    Iqm,
    /// A statistic expression passed through as-is.
    Custom(String),
}

impl Statistic {
    /// The wire spelling of this statistic.
    pub fn as_str(&self) -> &str {
        match self {
            Statistic::Average => "Average",
            Statistic::Sum => "Sum",
            Statistic::Minimum => "Minimum",
            Statistic::Maximum => "Maximum",
            Statistic::SampleCount => "SampleCount",
            Statistic::Iqm => "IQM",
            Statistic::Custom(s) => s,
        }
    }

    /// Maps a wire spelling back to a recognized keyword, or wraps it in
    /// [`Statistic::Custom`] untouched.
    pub fn parse(s: &str) -> Statistic {
        match s {
            "Average" => Statistic::Average,
            "Sum" => Statistic::Sum,
            "Minimum" => Statistic::Minimum,
            "Maximum" => Statistic::Maximum,
            "SampleCount" => Statistic::SampleCount,
            "IQM" => Statistic::Iqm,
            other => Statistic::Custom(other.to_string()),
        }
    }
}

impl Default for Statistic {
    /// Returns `Statistic::Average`, the default aggregation.
    fn default() -> Self {
        Statistic::Average
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Statistic {
    fn from(s: &str) -> Self {
        Statistic::parse(s)
    }
}

impl Serialize for Statistic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Statistic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatVisitor;

        impl<'de> Visitor<'de> for StatVisitor {
            type Value = Statistic;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a statistic keyword or expression string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Statistic, E> {
                Ok(Statistic::parse(v))
            }
        }

        deserializer.deserialize_str(StatVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Statistic::Average, "Average")]
    #[case(Statistic::Sum, "Sum")]
    #[case(Statistic::Minimum, "Minimum")]
    #[case(Statistic::Maximum, "Maximum")]
    #[case(Statistic::SampleCount, "SampleCount")]
    #[case(Statistic::Iqm, "IQM")]
    fn keyword_spellings_round_trip(#[case] stat: Statistic, #[case] wire: &str) {
        assert_eq!(stat.as_str(), wire);
        assert_eq!(Statistic::parse(wire), stat);
    }

    #[test]
    fn expression_strings_pass_through_uninterpreted() {
        let stat = Statistic::parse("tm(10%:90%)");
        assert_eq!(stat, Statistic::Custom("tm(10%:90%)".to_string()));
        assert_eq!(stat.as_str(), "tm(10%:90%)");
        // Malformed strings are not an error at this layer.
        assert_eq!(Statistic::parse("p999x").as_str(), "p999x");
    }

    #[test]
    fn default_is_average() {
        assert_eq!(Statistic::default(), Statistic::Average);
    }

    #[test]
    fn serde_uses_wire_spelling() {
        assert_eq!(serde_json::to_string(&Statistic::Iqm).unwrap(), "\"IQM\"");
        let back: Statistic = serde_json::from_str("\"p99\"").unwrap();
        assert_eq!(back, Statistic::Custom("p99".to_string()));
    }
}
