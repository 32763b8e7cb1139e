//! OTP core: sub-modules.

pub mod types;
pub mod codec;
pub mod secret;
pub mod core;
pub mod uri;
pub mod qr;
pub mod enroll;

// Re-export top-level items for convenience.
pub use types::*;
pub use enroll::build_enrollment;
