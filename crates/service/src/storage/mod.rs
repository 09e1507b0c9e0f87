pub mod json_document_store;

pub use json_document_store::JsonDocumentStore;
