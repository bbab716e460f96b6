pub mod value;
pub mod intent;
pub mod duration;
pub mod extract;
pub mod resolve;
pub mod transport;
pub mod pipeline;
