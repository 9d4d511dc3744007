//! Open-Meteo forecast and air quality responses

use serde::{Deserialize, Serialize};

use super::SourceError;

/// `GET /v1/forecast?current_weather=true`
#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub current_weather: Option<CurrentWeather>,
}

/// Current conditions block of a forecast response
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Degrees Celsius
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    /// WMO weather interpretation code
    pub weathercode: i32,
}

impl ForecastResponse {
    pub fn into_current(self) -> Result<CurrentWeather, SourceError> {
        self.current_weather
            .ok_or(SourceError::MissingField("current_weather"))
    }
}

/// `GET /v1/air-quality?current=us_aqi`
#[derive(Debug, Deserialize)]
pub(crate) struct AirQualityResponse {
    pub current: Option<AirQualityCurrent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirQualityCurrent {
    pub us_aqi: Option<f64>,
}

/// Current US AQI reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AirQuality {
    pub us_aqi: u32,
}

impl AirQualityResponse {
    pub fn into_reading(self) -> Result<AirQuality, SourceError> {
        let aqi = self
            .current
            .and_then(|c| c.us_aqi)
            .ok_or(SourceError::MissingField("current.us_aqi"))?;

        // The API reports whole numbers; clamp anything odd into range.
        Ok(AirQuality {
            us_aqi: aqi.max(0.0).round() as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forecast() {
        let body = r#"{
            "latitude": 18.5,
            "longitude": 73.875,
            "current_weather": {
                "time": "2026-10-18T09:00",
                "temperature": 27.4,
                "windspeed": 9.7,
                "winddirection": 280,
                "weathercode": 2,
                "is_day": 1
            }
        }"#;

        let response: ForecastResponse = serde_json::from_str(body).unwrap();
        let current = response.into_current().unwrap();
        assert_eq!(current.temperature, 27.4);
        assert_eq!(current.windspeed, 9.7);
        assert_eq!(current.weathercode, 2);
    }

    #[test]
    fn test_forecast_without_current_block() {
        let response: ForecastResponse = serde_json::from_str(r#"{"latitude": 1.0}"#).unwrap();
        assert!(matches!(
            response.into_current(),
            Err(SourceError::MissingField("current_weather"))
        ));
    }

    #[test]
    fn test_parse_air_quality() {
        let body = r#"{"current": {"time": "2026-10-18T09:00", "interval": 3600, "us_aqi": 87}}"#;
        let response: AirQualityResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_reading().unwrap().us_aqi, 87);
    }

    #[test]
    fn test_air_quality_null_reading() {
        let body = r#"{"current": {"us_aqi": null}}"#;
        let response: AirQualityResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_reading().is_err());
    }
}
