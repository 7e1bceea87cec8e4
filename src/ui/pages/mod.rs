//! Page components, one per route.

pub mod choose_plan;
pub mod complete;
pub mod dashboard;
pub mod landing;

pub use choose_plan::ChoosePlanPage;
pub use complete::CompletePage;
pub use dashboard::{DashboardBody, DashboardPage};
pub use landing::LandingPage;
