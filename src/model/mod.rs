pub mod config;
pub mod profile;
pub mod project;
pub mod view;

pub use config::*;
pub use profile::*;
pub use project::*;
pub use view::*;
