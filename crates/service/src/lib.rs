//! Service layer providing the villa business rules on top of models.
//! - Separates business logic from data access (`VillaRepository`).
//! - Reuses validation and entity definitions in `models` crate.
//! - Keeps the wire shape (`VillaTransfer`) apart from the storage shape.

pub mod errors;
pub mod villa;
#[cfg(test)]
pub mod test_support;
