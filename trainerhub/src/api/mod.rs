pub mod error;
pub mod extract;
pub mod health;
pub mod params;
pub mod records;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use state::AppState;
