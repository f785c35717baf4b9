mod cache;
mod config;
mod show;

pub use self::cache::cache;
pub use self::config::config;
pub use self::show::show;
