pub mod shortcode;
pub mod url_validator;

pub use shortcode::{generate_code, is_valid_code};
pub use url_validator::validate_url;
