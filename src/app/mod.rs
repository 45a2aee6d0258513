pub mod bootstrap;
pub mod shutdown;
