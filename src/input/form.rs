use serde::Deserialize;
use std::path::Path;

use super::parser::{ParseError, drop_closing_point, finite_points, read_to_string};
use crate::domain::{Boundary, ParcelForm};

/// A parcel form as written to disk, optionally with its boundary
#[derive(Debug, Deserialize)]
struct FormFile {
    #[serde(flatten)]
    form: ParcelForm,
    #[serde(default)]
    coordinates: Option<Boundary>,
}

/// Read a parcel form from a `.toml` or `.json` file
///
/// Keys use the API's camelCase names. A `coordinates` array of
/// `[lat, lng]` pairs, when present, is returned as the boundary.
pub fn read_form_file(path: &Path) -> Result<(ParcelForm, Option<Boundary>), ParseError> {
    let contents = read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let file: FormFile = if is_toml {
        toml::from_str(&contents)?
    } else {
        serde_json::from_str(&contents)?
    };

    let boundary = match file.coordinates {
        Some(b) => Some(Boundary::new(drop_closing_point(finite_points(b)?))),
        None => None,
    };
    Ok((file.form, boundary))
}
