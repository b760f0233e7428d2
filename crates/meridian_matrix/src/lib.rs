pub mod distance_matrix;
pub mod enrich;
pub mod google_api;
pub mod provider;
