pub mod model;
pub mod repository;
pub mod service;

pub use model::{Cat, CatChanges, CatDocument, NewCat};
pub use repository::{CatRepository, FileCatRepository};
pub use service::CatService;
