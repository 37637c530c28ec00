//! HTML page handlers.

mod home;
mod login;
mod logout;
mod register;
mod shorten;

pub use home::{IndexTemplate, LinkView, home_handler};
pub use login::{login_handler, login_page_handler};
pub use logout::logout_handler;
pub use register::{register_handler, register_page_handler};
pub use shorten::shorten_handler;
