//! Weather and Air Quality Widget
//!
//! Current conditions and a colored US AQI badge for one coordinate. The two
//! readings come from separate endpoints and fail separately: a missing AQI
//! still shows the temperature.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::sources::{AirQuality, CurrentWeather, DataSource};

/// A point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Description and icon for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherInfo {
    pub description: &'static str,
    pub icon_class: &'static str,
}

pub const UNKNOWN_WEATHER: WeatherInfo = WeatherInfo {
    description: "Unknown",
    icon_class: "fas fa-question-circle",
};

/// Checked in order, first match wins
const WEATHER_BUCKETS: &[(RangeInclusive<i32>, WeatherInfo)] = &[
    (
        0..=0,
        WeatherInfo {
            description: "Clear Sky",
            icon_class: "fas fa-sun",
        },
    ),
    (
        1..=3,
        WeatherInfo {
            description: "Partly Cloudy",
            icon_class: "fas fa-cloud-sun",
        },
    ),
    (
        51..=65,
        WeatherInfo {
            description: "Rainy Showers",
            icon_class: "fas fa-cloud-showers-heavy",
        },
    ),
    (
        71..=75,
        WeatherInfo {
            description: "Snowfall",
            icon_class: "fas fa-snowflake",
        },
    ),
    (
        95..=i32::MAX,
        WeatherInfo {
            description: "Thunderstorm",
            icon_class: "fas fa-cloud-bolt",
        },
    ),
    (
        45..=48,
        WeatherInfo {
            description: "Foggy",
            icon_class: "fas fa-smog",
        },
    ),
];

/// Map a WMO weather code to a description and icon
pub fn weather_info(code: i32) -> WeatherInfo {
    WEATHER_BUCKETS
        .iter()
        .find(|(range, _)| range.contains(&code))
        .map(|(_, info)| *info)
        .unwrap_or(UNKNOWN_WEATHER)
}

/// Severity label and badge color for an AQI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiInfo {
    pub label: &'static str,
    pub color: &'static str,
}

/// Upper bounds, inclusive; anything above the last bound is hazardous
const AQI_THRESHOLDS: &[(u32, AqiInfo)] = &[
    (
        50,
        AqiInfo {
            label: "Good",
            color: "#28a745",
        },
    ),
    (
        100,
        AqiInfo {
            label: "Moderate",
            color: "#ffc107",
        },
    ),
    (
        150,
        AqiInfo {
            label: "Unhealthy (Sen)",
            color: "#fd7e14",
        },
    ),
    (
        200,
        AqiInfo {
            label: "Unhealthy",
            color: "#dc3545",
        },
    ),
];

const AQI_HAZARDOUS: AqiInfo = AqiInfo {
    label: "Hazardous",
    color: "#6f42c1",
};

/// Map a US AQI value to its severity bucket
pub fn aqi_info(aqi: u32) -> AqiInfo {
    AQI_THRESHOLDS
        .iter()
        .find(|(max, _)| aqi <= *max)
        .map(|(_, info)| *info)
        .unwrap_or(AQI_HAZARDOUS)
}

/// What the AQI element shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AqiDisplay {
    Reading {
        value: u32,
        text: String,
        color: &'static str,
    },
    Unavailable,
}

impl AqiDisplay {
    pub fn from_reading(reading: AirQuality) -> Self {
        let info = aqi_info(reading.us_aqi);
        AqiDisplay::Reading {
            value: reading.us_aqi,
            text: format!("{} ({})", info.label, reading.us_aqi),
            color: info.color,
        }
    }
}

/// Display values for the weather panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherPanel {
    pub location: String,
    pub temperature: String,
    pub wind_speed: String,
    pub description: String,
    pub icon_class: &'static str,
    pub aqi: AqiDisplay,
}

impl WeatherPanel {
    fn new(location: &str, weather: Option<CurrentWeather>, aqi: Option<AirQuality>) -> Self {
        let (temperature, wind_speed, info) = match weather {
            Some(w) => (
                w.temperature.to_string(),
                format!("{} km/h", w.windspeed),
                weather_info(w.weathercode),
            ),
            None => (
                "--".to_string(),
                "--".to_string(),
                WeatherInfo {
                    description: "Unavailable",
                    icon_class: UNKNOWN_WEATHER.icon_class,
                },
            ),
        };

        Self {
            location: location.to_string(),
            temperature,
            wind_speed,
            description: info.description.to_string(),
            icon_class: info.icon_class,
            aqi: aqi.map(AqiDisplay::from_reading).unwrap_or(AqiDisplay::Unavailable),
        }
    }
}

/// Fetch both readings concurrently and build the panel.
///
/// Never fails: each half falls back to placeholders on its own.
pub async fn load(source: &dyn DataSource, location: &str, at: Coordinates) -> WeatherPanel {
    let (weather, aqi) = tokio::join!(source.current_weather(at), source.current_air_quality(at));

    let weather = weather
        .map_err(|e| tracing::warn!(error = %e, "Weather data fetch error"))
        .ok();
    let aqi = aqi
        .map_err(|e| tracing::warn!(error = %e, "Air quality fetch error"))
        .ok();

    WeatherPanel::new(location, weather, aqi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::testing::FakeSource;

    const PUNE: Coordinates = Coordinates {
        latitude: 18.5204,
        longitude: 73.8567,
    };

    #[test]
    fn test_weather_buckets() {
        assert_eq!(weather_info(0).description, "Clear Sky");
        assert_eq!(weather_info(0).icon_class, "fas fa-sun");

        for code in 1..=3 {
            assert_eq!(weather_info(code).description, "Partly Cloudy");
        }
        for code in 45..=48 {
            assert_eq!(weather_info(code).icon_class, "fas fa-smog");
        }
        for code in 51..=65 {
            assert_eq!(weather_info(code).description, "Rainy Showers");
        }
        for code in 71..=75 {
            assert_eq!(weather_info(code).description, "Snowfall");
        }
        assert_eq!(weather_info(95).description, "Thunderstorm");
        assert_eq!(weather_info(99).icon_class, "fas fa-cloud-bolt");
    }

    #[test]
    fn test_unmatched_weather_codes() {
        for code in [-1, 4, 10, 44, 49, 50, 66, 70, 76, 80, 94] {
            assert_eq!(weather_info(code), UNKNOWN_WEATHER, "code {}", code);
        }
    }

    #[test]
    fn test_aqi_buckets() {
        assert_eq!(aqi_info(10).label, "Good");
        assert_eq!(aqi_info(75).label, "Moderate");
        assert_eq!(aqi_info(125).label, "Unhealthy (Sen)");
        assert_eq!(aqi_info(175).label, "Unhealthy");
        assert_eq!(aqi_info(250).label, "Hazardous");
    }

    #[test]
    fn test_aqi_bucket_edges() {
        assert_eq!(aqi_info(0).label, "Good");
        assert_eq!(aqi_info(50).label, "Good");
        assert_eq!(aqi_info(51).label, "Moderate");
        assert_eq!(aqi_info(100).label, "Moderate");
        assert_eq!(aqi_info(101).color, "#fd7e14");
        assert_eq!(aqi_info(200).color, "#dc3545");
        assert_eq!(aqi_info(201).color, "#6f42c1");
    }

    #[test]
    fn test_aqi_badge_text() {
        let display = AqiDisplay::from_reading(AirQuality { us_aqi: 87 });
        assert_eq!(
            display,
            AqiDisplay::Reading {
                value: 87,
                text: "Moderate (87)".to_string(),
                color: "#ffc107",
            }
        );
    }

    #[tokio::test]
    async fn test_load_full_panel() {
        let source = FakeSource::default();
        let panel = load(&source, "Pune", PUNE).await;

        assert_eq!(panel.temperature, "27.4");
        assert_eq!(panel.wind_speed, "9.7 km/h");
        assert_eq!(panel.description, "Partly Cloudy");
        assert_eq!(panel.icon_class, "fas fa-cloud-sun");
        assert!(matches!(panel.aqi, AqiDisplay::Reading { value: 87, .. }));
    }

    #[tokio::test]
    async fn test_air_quality_failure_keeps_weather() {
        let source = FakeSource {
            fail_air_quality: true,
            ..Default::default()
        };
        let panel = load(&source, "Pune", PUNE).await;

        assert_eq!(panel.temperature, "27.4");
        assert_eq!(panel.description, "Partly Cloudy");
        assert_eq!(panel.aqi, AqiDisplay::Unavailable);
    }

    #[tokio::test]
    async fn test_weather_failure_uses_placeholders() {
        let source = FakeSource {
            fail_weather: true,
            ..Default::default()
        };
        let panel = load(&source, "Pune", PUNE).await;

        assert_eq!(panel.temperature, "--");
        assert_eq!(panel.wind_speed, "--");
        assert_eq!(panel.description, "Unavailable");
        assert!(matches!(panel.aqi, AqiDisplay::Reading { .. }));
    }
}
