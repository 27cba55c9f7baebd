mod defaults;
mod io;
mod schema;
mod validate;

pub use io::{load_config, save_config};
pub use schema::Config;
pub use validate::ConfigError;
