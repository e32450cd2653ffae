pub mod convert;
pub mod patch;
