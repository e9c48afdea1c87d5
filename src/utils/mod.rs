pub mod clock;
pub mod jwt;
pub mod multipart;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use clock::{Clock, SystemClock};
pub use parameter_error_handler::{json_error_handler, path_error_handler, query_error_handler};
pub use password::{Argon2Verifier, CredentialVerifier};
pub use validate::sanitize_file_name;
