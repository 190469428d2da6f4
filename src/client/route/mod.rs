pub mod callback;
pub mod home;
pub mod login;
pub mod not_found;

pub use callback::Callback;
pub use home::Home;
pub use login::Login;
pub use not_found::NotFound;
