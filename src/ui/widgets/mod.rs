pub mod stat_tile;

pub use stat_tile::StatTile;
