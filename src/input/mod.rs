pub mod form;
pub mod parser;

pub use form::read_form_file;
pub use parser::{ParseError, parse_boundary, read_boundary_file};
