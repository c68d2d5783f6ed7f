pub mod constants;
pub mod string_utils;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{
    UrlValidationError, brand_from_url, normalize_url, same_origin, validate_seed_url,
};
