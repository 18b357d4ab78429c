pub mod api;
pub mod minifigure;
pub mod price;
