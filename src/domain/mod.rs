pub mod coordinate;
pub mod draft;
pub mod parcel;

pub use coordinate::{Boundary, Coordinate};
pub use draft::{BoundaryDraft, DraftError};
pub use parcel::{
    AddLandRequest, LandParcel, LandSearchFilters, LandType, ParcelError, ParcelForm, Province,
};
