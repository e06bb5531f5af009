use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Units an area can be reported in
///
/// The calculator always works in square meters; these are display and
/// export conversions only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    #[default]
    #[value(alias = "m2")]
    Sqm,
    #[value(alias = "ha")]
    Hectares,
    Acres,
    /// Imperial perch (square rod), the usual unit for Sri Lankan land deeds
    Perches,
    #[value(alias = "ft2")]
    Sqft,
}

impl AreaUnit {
    /// Square meters in one of this unit
    pub fn square_meters(self) -> f64 {
        match self {
            AreaUnit::Sqm => 1.0,
            AreaUnit::Hectares => 10_000.0,
            AreaUnit::Acres => 4_046.856_422_4,
            AreaUnit::Perches => 25.292_852_64,
            AreaUnit::Sqft => 0.092_903_04,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AreaUnit::Sqm => "m²",
            AreaUnit::Hectares => "ha",
            AreaUnit::Acres => "ac",
            AreaUnit::Perches => "P",
            AreaUnit::Sqft => "ft²",
        }
    }
}

/// Convert square meters into `unit`
pub fn from_square_meters(area_m2: f64, unit: AreaUnit) -> f64 {
    area_m2 / unit.square_meters()
}

/// Convert a value in `unit` back into square meters
pub fn to_square_meters(value: f64, unit: AreaUnit) -> f64 {
    value * unit.square_meters()
}

/// Format with `,` thousands separators and a fixed number of decimals
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    // "-0.00" reads badly for a rounded-away negative
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a square-meter area in `unit`, e.g. `"1,234.57 m²"`
pub fn format_area(area_m2: f64, unit: AreaUnit, precision: usize) -> String {
    format!(
        "{} {}",
        format_number(from_square_meters(area_m2, unit), precision),
        unit.symbol()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert!((from_square_meters(10_000.0, AreaUnit::Hectares) - 1.0).abs() < 1e-12);
        assert!((from_square_meters(4_046.856_422_4, AreaUnit::Acres) - 1.0).abs() < 1e-12);
        assert!((from_square_meters(25.292_852_64, AreaUnit::Perches) - 1.0).abs() < 1e-12);
        // 160 perches to the acre
        let perches_per_acre = AreaUnit::Acres.square_meters() / AreaUnit::Perches.square_meters();
        assert!((perches_per_acre - 160.0).abs() < 1e-9);
        assert!((to_square_meters(2.5, AreaUnit::Hectares) - 25_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1000.0, 0), "1,000");
        assert_eq!(format_number(0.5, 3), "0.500");
        assert_eq!(format_number(-12_345.6, 1), "-12,345.6");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_area() {
        assert_eq!(format_area(12_345.678, AreaUnit::Sqm, 2), "12,345.68 m²");
        assert_eq!(format_area(25_000.0, AreaUnit::Hectares, 1), "2.5 ha");
    }

    #[test]
    fn test_unit_from_config_string() {
        let unit: AreaUnit = serde_json::from_str("\"perches\"").unwrap();
        assert_eq!(unit, AreaUnit::Perches);
    }
}
