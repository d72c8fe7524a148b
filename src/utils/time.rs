//! Time parsing and formatting utilities

use crate::domain::errors::DomainError;

/// Parser for clock-style timestamps printed by the transcoder
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse `HH:MM:SS.ff` (fraction optional) to seconds
    pub fn parse_clock(&self, time_str: &str) -> Result<f64, DomainError> {
        let time_str = time_str.trim();
        let parts: Vec<&str> = time_str.split(':').collect();
        if parts.len() != 3 {
            return Err(invalid(time_str));
        }

        let hours: f64 = parts[0].parse().map_err(|_| invalid(time_str))?;
        let minutes: f64 = parts[1].parse().map_err(|_| invalid(time_str))?;
        let seconds: f64 = parts[2].parse().map_err(|_| invalid(time_str))?;

        if hours < 0.0 || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
            return Err(invalid(time_str));
        }

        Ok(Self::to_seconds(hours, minutes, seconds))
    }

    /// `hours * 3600 + minutes * 60 + seconds`
    fn to_seconds(hours: f64, minutes: f64, seconds: f64) -> f64 {
        hours * 3600.0 + minutes * 60.0 + seconds
    }

    /// Format seconds as `HH:MM:SS.mmm`
    pub fn format_time(&self, seconds: f64) -> String {
        let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
    }
}

fn invalid(time_str: &str) -> DomainError {
    DomainError::BadArgs(format!(
        "Invalid timestamp: {}. Expected HH:MM:SS.ff",
        time_str
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock() {
        let parser = TimeParser::new();
        assert_eq!(parser.parse_clock("00:01:05.50").unwrap(), 65.5);
        assert_eq!(parser.parse_clock("01:00:00").unwrap(), 3600.0);
        assert_eq!(parser.parse_clock("10:02:03.25").unwrap(), 36123.25);
    }

    #[test]
    fn test_parse_clock_rejects_malformed() {
        let parser = TimeParser::new();
        assert!(parser.parse_clock("01:05.50").is_err());
        assert!(parser.parse_clock("00:61:00").is_err());
        assert!(parser.parse_clock("aa:bb:cc").is_err());
    }

    #[test]
    fn test_format_time() {
        let parser = TimeParser::new();
        assert_eq!(parser.format_time(65.5), "00:01:05.500");
        assert_eq!(parser.format_time(3723.25), "01:02:03.250");
        assert_eq!(parser.format_time(0.0), "00:00:00.000");
    }
}
