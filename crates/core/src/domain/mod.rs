pub mod season;
pub mod wardrobe;
pub mod weather;
