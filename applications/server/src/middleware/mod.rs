/// Request extractors shared by the API handlers
mod session;

pub use session::{Session, SESSION_COOKIE};
