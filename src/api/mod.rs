pub mod lands;

pub use lands::LandsClient;
