//! Document model: field paths, resource paths, references and values.

mod field_path;
mod reference;
mod resource_path;
mod value;

pub use field_path::{FieldPath, DOCUMENT_KEY_NAME};
pub use reference::{CollectionReference, DocumentReference};
pub use resource_path::ResourcePath;
pub use value::Value;
