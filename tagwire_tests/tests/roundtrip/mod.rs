pub mod records;
pub mod streams;
pub mod values;
