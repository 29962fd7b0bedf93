pub mod template;

pub use template::ObjectTemplate;
