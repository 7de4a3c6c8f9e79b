pub mod cancel;
pub mod core;
pub mod error;
pub mod rng;
