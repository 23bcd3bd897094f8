pub mod config_io;
pub mod dataset;
pub mod export;
pub mod image;
pub mod lock;
pub mod recovery;
pub mod saver;
pub mod store;
pub mod upload;
pub mod watcher;
