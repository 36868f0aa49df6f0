pub mod generate;
pub mod outfits;
pub mod utils;
