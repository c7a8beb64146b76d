pub(crate) mod audio;
pub(crate) mod config;
pub(crate) mod interpreter;
pub(crate) mod recording;
pub(crate) mod script;
pub(crate) mod session;
