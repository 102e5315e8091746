pub mod registry;

pub use registry::AppRegistry;
