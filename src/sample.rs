//! Struct `Sample` represents a labeled batch sample.

pub mod feature;
pub mod sample_struct;
pub mod reader;


pub use reader::{SampleReader, FileFormat};
pub use sample_struct::Sample;
pub use feature::Feature;
