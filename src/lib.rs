pub mod cli;
pub mod emitter;
pub mod logging;
