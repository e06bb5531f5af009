pub mod area;
pub mod bounds;
pub mod projection;
pub mod simplicity;
pub mod units;

pub use area::{AreaMethod, Winding, area_with_method, polygon_area, signed_area_deg2, winding};
pub use bounds::Bounds;
pub use projection::Projector;
pub use simplicity::{SimplicityReport, find_crossings, is_simple};
pub use units::{AreaUnit, format_area, format_number};
