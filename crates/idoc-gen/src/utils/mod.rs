pub mod loader;

pub(crate) use loader::JsonLoader;
