//! Authentication and route protection

mod errors;
mod guard;
mod handlers;
pub(crate) mod middleware;

pub(crate) use guard::RoleGuard;
pub(crate) use handlers::*;
