//! Land parcel records as exchanged with the land records API
//!
//! Field names follow the API's camelCase JSON. The area on a request is
//! always recomputed from its boundary with the flat method, so a stored
//! record reproduces the figure the registry has on file.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

use super::Boundary;
use crate::geometry::area;

static DEED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9-]+$").expect("deed number pattern is valid"));

pub const DISTRICTS: [&str; 25] = [
    "Ampara",
    "Anuradhapura",
    "Badulla",
    "Batticaloa",
    "Colombo",
    "Galle",
    "Gampaha",
    "Hambantota",
    "Jaffna",
    "Kalutara",
    "Kandy",
    "Kegalle",
    "Kilinochchi",
    "Kurunegala",
    "Mannar",
    "Matale",
    "Matara",
    "Monaragala",
    "Mullaitivu",
    "Nuwara Eliya",
    "Polonnaruwa",
    "Puttalam",
    "Ratnapura",
    "Trincomalee",
    "Vavuniya",
];

/// Look up a district by name, ignoring case and surrounding whitespace
pub fn canonical_district(name: &str) -> Option<&'static str> {
    let name = name.trim();
    DISTRICTS
        .iter()
        .copied()
        .find(|d| d.eq_ignore_ascii_case(name))
}

#[derive(Debug, Error, PartialEq)]
pub enum ParcelError {
    #[error("land boundary has no points; draw the boundary before submitting")]
    MissingBoundary,

    #[error("invalid deed number format: {0:?} (expected A-Z, 0-9 and '-')")]
    InvalidDeedNumber(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown district: {0:?}")]
    UnknownDistrict(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandType {
    Residential,
    Commercial,
    Agricultural,
    Industrial,
}

impl fmt::Display for LandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LandType::Residential => "Residential",
            LandType::Commercial => "Commercial",
            LandType::Agricultural => "Agricultural",
            LandType::Industrial => "Industrial",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Province {
    Western,
    Central,
    Southern,
    Northern,
    Eastern,
    #[serde(rename = "North Western")]
    NorthWestern,
    #[serde(rename = "North Central")]
    NorthCentral,
    Uva,
    Sabaragamuwa,
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Province::Western => "Western",
            Province::Central => "Central",
            Province::Southern => "Southern",
            Province::Northern => "Northern",
            Province::Eastern => "Eastern",
            Province::NorthWestern => "North Western",
            Province::NorthCentral => "North Central",
            Province::Uva => "Uva",
            Province::Sabaragamuwa => "Sabaragamuwa",
        };
        write!(f, "{} Province", name)
    }
}

/// Operator-entered details of a parcel, everything except the geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelForm {
    pub deed_number: String,
    pub survey_plan_number: String,
    pub owner_name: String,
    pub owner_address: String,
    pub land_type: LandType,
    pub address: String,
    pub district: String,
    pub province: Province,
}

impl ParcelForm {
    /// Check required fields and formats, normalizing the district name
    pub fn validate(&mut self) -> Result<(), ParcelError> {
        let required = [
            ("deedNumber", &self.deed_number),
            ("surveyPlanNumber", &self.survey_plan_number),
            ("ownerName", &self.owner_name),
            ("ownerAddress", &self.owner_address),
            ("address", &self.address),
            ("district", &self.district),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ParcelError::MissingField(name));
            }
        }

        if !DEED_NUMBER.is_match(&self.deed_number) {
            return Err(ParcelError::InvalidDeedNumber(self.deed_number.clone()));
        }

        let district = canonical_district(&self.district)
            .ok_or_else(|| ParcelError::UnknownDistrict(self.district.clone()))?;
        self.district = district.to_string();

        Ok(())
    }
}

/// Body of a create/update call: the form plus boundary and its area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddLandRequest {
    #[serde(flatten)]
    pub form: ParcelForm,
    /// Square meters
    pub area: f64,
    pub coordinates: Boundary,
}

impl AddLandRequest {
    /// Validate the form, require a drawn boundary, and compute the area
    ///
    /// A boundary with one or two points is accepted and carries an area
    /// of 0.
    pub fn assemble(mut form: ParcelForm, boundary: Boundary) -> Result<Self, ParcelError> {
        if boundary.is_empty() {
            return Err(ParcelError::MissingBoundary);
        }
        form.validate()?;

        let area = area::polygon_area(boundary.points());
        tracing::debug!(
            deed = %form.deed_number,
            points = boundary.len(),
            area_m2 = area,
            "assembled land request"
        );

        Ok(Self {
            form,
            area,
            coordinates: boundary,
        })
    }
}

/// A parcel as stored by the land records API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandParcel {
    pub id: String,
    pub deed_number: String,
    pub survey_plan_number: String,
    pub owner_name: String,
    pub owner_address: String,
    pub land_type: LandType,
    pub area: f64,
    pub coordinates: Boundary,
    pub address: String,
    pub district: String,
    pub province: Province,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_date: Option<String>,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl LandParcel {
    pub fn status_label(&self) -> &'static str {
        if self.is_verified { "Verified" } else { "Pending" }
    }
}

/// Filters for the parcel search endpoint; unset fields are left out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandSearchFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deed_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_plan_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub land_type: Option<LandType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl LandSearchFilters {
    pub fn is_empty(&self) -> bool {
        self.deed_number.is_none()
            && self.survey_plan_number.is_none()
            && self.owner_name.is_none()
            && self.land_type.is_none()
            && self.district.is_none()
            && self.is_verified.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> ParcelForm {
        ParcelForm {
            deed_number: "DN-12345".to_string(),
            survey_plan_number: "SP-67890".to_string(),
            owner_name: "A. Perera".to_string(),
            owner_address: "12 Temple Road, Kandy".to_string(),
            land_type: LandType::Residential,
            address: "Lot 4, Peradeniya Road".to_string(),
            district: "kandy".to_string(),
            province: Province::Central,
        }
    }

    fn square() -> Boundary {
        Boundary::from_pairs(&[
            (7.2906, 80.6337),
            (7.2906, 80.6346),
            (7.2915, 80.6346),
            (7.2915, 80.6337),
        ])
    }

    #[test]
    fn test_assemble_computes_flat_area() {
        let boundary = square();
        let expected = boundary.area();
        let req = AddLandRequest::assemble(sample_form(), boundary).unwrap();

        assert_eq!(req.area, expected);
        assert_eq!(req.form.district, "Kandy");
        assert!(req.area > 0.0);
    }

    #[test]
    fn test_assemble_rejects_empty_boundary() {
        let err = AddLandRequest::assemble(sample_form(), Boundary::default()).unwrap_err();
        assert_eq!(err, ParcelError::MissingBoundary);
    }

    #[test]
    fn test_assemble_accepts_two_points_with_zero_area() {
        let boundary = Boundary::from_pairs(&[(7.0, 80.0), (7.1, 80.1)]);
        let req = AddLandRequest::assemble(sample_form(), boundary).unwrap();
        assert_eq!(req.area, 0.0);
    }

    #[test]
    fn test_lowercase_deed_number_rejected() {
        let mut form = sample_form();
        form.deed_number = "dn-123".to_string();
        assert_eq!(
            form.validate(),
            Err(ParcelError::InvalidDeedNumber("dn-123".to_string()))
        );
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut form = sample_form();
        form.owner_name = "   ".to_string();
        assert_eq!(form.validate(), Err(ParcelError::MissingField("ownerName")));
    }

    #[test]
    fn test_unknown_district_rejected() {
        let mut form = sample_form();
        form.district = "Atlantis".to_string();
        assert!(matches!(
            form.validate(),
            Err(ParcelError::UnknownDistrict(_))
        ));
    }

    #[test]
    fn test_request_json_shape() {
        let req = AddLandRequest::assemble(sample_form(), square()).unwrap();
        let value = serde_json::to_value(&req).unwrap();

        assert_eq!(value["deedNumber"], "DN-12345");
        assert_eq!(value["landType"], "residential");
        assert_eq!(value["province"], "Central");
        assert_eq!(value["coordinates"][0][0], 7.2906);
        assert!(value["area"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_province_names() {
        let p: Province = serde_json::from_str("\"North Western\"").unwrap();
        assert_eq!(p, Province::NorthWestern);
        assert_eq!(p.to_string(), "North Western Province");
    }

    #[test]
    fn test_search_filters_skip_unset() {
        let filters = LandSearchFilters {
            district: Some("Galle".to_string()),
            is_verified: Some(true),
            ..Default::default()
        };
        let value = serde_json::to_value(&filters).unwrap();
        assert_eq!(value, serde_json::json!({"district": "Galle", "isVerified": true}));
        assert!(!filters.is_empty());
        assert!(LandSearchFilters::default().is_empty());
    }

    #[test]
    fn test_parse_land_parcel() {
        let json = r#"{
            "id": "land-1",
            "deedNumber": "DN-1",
            "surveyPlanNumber": "SP-1",
            "ownerName": "Owner",
            "ownerAddress": "Somewhere",
            "landType": "agricultural",
            "area": 1500.5,
            "coordinates": [[6.0, 80.0], [6.0, 80.001], [6.001, 80.0]],
            "address": "Field 7",
            "district": "Galle",
            "province": "Southern",
            "isVerified": false,
            "createdBy": "admin",
            "updatedBy": "admin",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let parcel: LandParcel = serde_json::from_str(json).unwrap();
        assert_eq!(parcel.coordinates.len(), 3);
        assert_eq!(parcel.verification_date, None);
        assert_eq!(parcel.status_label(), "Pending");
    }
}
