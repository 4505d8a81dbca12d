//! Document model: the value tree that queries run against and its
//! conversions from decoded JSON and YAML.

pub mod parser;
pub mod value;
