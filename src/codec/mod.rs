pub mod reader;
#[cfg(test)]
pub mod writer;
pub mod types;

pub use reader::BinaryReader;
#[cfg(test)]
pub use writer::BinaryWriter;
pub use types::*;
