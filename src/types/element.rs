//! Defines the observation element types the enrichment pipeline understands
//! and their Frost `elementId` wire representations.

use std::fmt;

/// An observation element (a measured quantity) reported by a Frost station.
///
/// Station sensor coverage varies, so a station is probed for the subset of
/// these it actually reports before observations are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// Mean daily air temperature.
    MeanAirTemperature,
    /// Minimum daily air temperature.
    MinAirTemperature,
    /// Maximum daily air temperature.
    MaxAirTemperature,
    /// Mean daily relative humidity.
    MeanRelativeHumidity,
    /// Volume fraction of water in soil at 10 cm depth.
    SoilWaterFraction,
}

impl Element {
    /// Every element the pipeline can request, in query order.
    pub const ALL: [Element; 5] = [
        Element::MeanAirTemperature,
        Element::MinAirTemperature,
        Element::MaxAirTemperature,
        Element::MeanRelativeHumidity,
        Element::SoilWaterFraction,
    ];

    /// The Frost `elementId` string for this element.
    pub fn element_id(&self) -> &'static str {
        match self {
            Element::MeanAirTemperature => "mean(air_temperature P1D)",
            Element::MinAirTemperature => "min(air_temperature P1D)",
            Element::MaxAirTemperature => "max(air_temperature P1D)",
            Element::MeanRelativeHumidity => "mean(relative_humidity P1D)",
            Element::SoilWaterFraction => "volume_fraction_of_water_in_soil SW10",
        }
    }

    /// Maps a Frost `elementId` back to an element. Unknown ids yield `None`
    /// and are ignored by the callers.
    pub fn from_element_id(id: &str) -> Option<Element> {
        Element::ALL.into_iter().find(|e| e.element_id() == id)
    }

    /// Renders a comma-separated `elements` query parameter.
    pub(crate) fn query_list(elements: impl IntoIterator<Item = Element>) -> String {
        elements
            .into_iter()
            .map(|e| e.element_id())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Formats an `Element` as its Frost `elementId`.
///
/// # Examples
///
/// ```
/// use frost_enrich::Element;
///
/// assert_eq!(
///     Element::MeanAirTemperature.to_string(),
///     "mean(air_temperature P1D)"
/// );
/// ```
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ids_round_trip() {
        for element in Element::ALL {
            assert_eq!(Element::from_element_id(element.element_id()), Some(element));
        }
    }

    #[test]
    fn unknown_element_id_is_none() {
        assert_eq!(Element::from_element_id("sum(precipitation_amount P1D)"), None);
        assert_eq!(Element::from_element_id(""), None);
    }

    #[test]
    fn query_list_is_comma_separated() {
        let list = Element::query_list([
            Element::MeanAirTemperature,
            Element::SoilWaterFraction,
        ]);
        assert_eq!(
            list,
            "mean(air_temperature P1D),volume_fraction_of_water_in_soil SW10"
        );
    }
}
