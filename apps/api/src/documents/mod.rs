// Saved CVs: owner-scoped CRUD behind the DocumentStore trait.

pub mod handlers;
pub mod store;
