//! Unicode Character Database builder.
//!
//! Parses the UCD and Unihan text files into a [`UnicodeDatabaseBuilder`], which holds the per code point and per range properties of every character.
//! Files are provided by a [`UcdSource`], and are processed in a fixed order by [`UnicodeDataProcessor`].

mod code_point;
pub use code_point::*;

mod properties;
pub use properties::*;

mod error;
pub use error::*;

mod reader;
pub use reader::*;

mod character;
pub use character::*;

mod unihan;
pub use unihan::*;

mod property_set;
pub use property_set::*;

mod database;
pub use database::*;

mod source;
pub use source::*;

mod settings;
pub use settings::*;

mod processor;
pub use processor::*;
