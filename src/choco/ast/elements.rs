//! Element types of the canonical tree

pub mod document;
pub mod element;
pub mod instance;
pub mod value;

pub use document::Document;
pub use element::Element;
pub use instance::Instance;
pub use value::{Value, ValueType};
