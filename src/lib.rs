pub mod builders;
pub mod codec;
pub mod constants;
pub mod errors;
pub mod request;
pub mod services;
pub mod transport;
pub mod utils;
