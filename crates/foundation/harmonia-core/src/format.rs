//! Degree formatting - decimal degrees as degrees°minutes'seconds"

/// Whole degrees, minutes and seconds of an angle, rounded to the second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeParts {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl DegreeParts {
    /// Round an angle to the nearest whole second of arc
    pub fn round_to_second(value: f64) -> f64 {
        (value * 3600.0).round() / 3600.0
    }

    pub fn from_degrees(value: f64) -> Self {
        let total = (value.abs() * 3600.0).round() as u64;
        Self {
            degrees: (total / 3600) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }
}

/// Compact form: trailing zero minutes and seconds are dropped.
///
/// `90°`, `12°30'`, `0°0'15"`
pub fn format_degrees(value: f64) -> String {
    let parts = DegreeParts::from_degrees(value);
    let mut out = format!("{}°", parts.degrees);
    if parts.minutes > 0 || parts.seconds > 0 {
        out.push_str(&format!("{}'", parts.minutes));
    }
    if parts.seconds > 0 {
        out.push_str(&format!("{}\"", parts.seconds));
    }
    out
}

/// Fixed ten-character form with all zeros, for tables: `090°00'00"`
pub fn format_degrees_table(value: f64) -> String {
    let parts = DegreeParts::from_degrees(value);
    format!(
        "{:<10}",
        format!("{:03}°{:02}'{:02}\"", parts.degrees, parts.minutes, parts.seconds)
    )
}
