pub mod product;
pub mod quiz;
