pub mod session;
pub mod nlu;
pub mod upload;
