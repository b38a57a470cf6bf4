//! Bearer token validation
//!
//! Tokens are issued by an external identity provider. The backend only
//! checks the signature and expiry and reads the owner id from `sub`.

mod jwt;
mod middleware;

pub use jwt::{Claims, JwtService};
pub use middleware::Owner;
