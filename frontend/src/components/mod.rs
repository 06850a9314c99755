pub mod feed_page;
pub mod landing_page;
pub mod login_page;
pub mod navbar;
pub mod upload_page;
pub mod utils;
