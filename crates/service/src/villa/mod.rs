//! Villa module: domain shape, patch engine, repository and service.

pub mod domain;
pub mod patch;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::VillaTransfer;
pub use patch::PatchOperation;
pub use service::VillaService;
