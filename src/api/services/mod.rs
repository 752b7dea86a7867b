pub mod health;
pub mod links;
pub mod redirect;

pub use health::{AppStartTime, HealthService, health_routes};
pub use links::urls_routes;
pub use redirect::{RedirectService, redirect_routes};
