pub mod csv_export;

pub use csv_export::{matches_to_csv, write_matches};
