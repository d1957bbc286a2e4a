// Core modules implementing resource location, reading, and error modeling.
pub mod error;
pub mod locate;
pub mod read;
