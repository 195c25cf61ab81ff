//! Excel input and template output

pub mod reader;
pub mod template;

pub use reader::read_sheet;
pub use template::write_template;
