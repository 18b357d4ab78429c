pub mod maj;
pub mod minifigures;
