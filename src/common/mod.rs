//! Small helpers shared by the deck writer and the deck inspector.

pub mod unit;
pub mod xml;

pub use unit::{EMUS_PER_INCH, inches};
pub use xml::{escape_xml, unescape_xml};
