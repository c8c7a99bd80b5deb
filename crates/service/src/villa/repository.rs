use async_trait::async_trait;

use crate::errors::ServiceError;

/// Storage collaborator for villas. Every call commits on its own.
#[async_trait]
pub trait VillaRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<models::villa::Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<models::villa::Model>, ServiceError>;
    /// Case-insensitive match on `first_name`.
    async fn find_by_first_name(&self, first_name: &str) -> Result<Option<models::villa::Model>, ServiceError>;
    /// Insert a new row; `villa.id` is ignored and the assigned id is returned.
    async fn insert(&self, villa: models::villa::Model) -> Result<models::villa::Model, ServiceError>;
    /// Overwrite every column of the row matching `villa.id`.
    async fn update(&self, villa: models::villa::Model) -> Result<models::villa::Model, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    use models::villa::{name_key, Model};

    #[derive(Default)]
    struct State {
        rows: BTreeMap<i32, Model>,
        last_id: i32,
        writes: usize,
    }

    /// Mirrors the database: ids ascend from 1 and `first_name` is unique
    /// ignoring case.
    #[derive(Default)]
    pub struct MockVillaRepository {
        state: Mutex<State>,
    }

    impl MockVillaRepository {
        /// Number of successful inserts, updates and deletes so far.
        pub fn writes(&self) -> usize { self.lock().writes }

        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    fn name_taken(rows: &BTreeMap<i32, Model>, name: &str, except: i32) -> bool {
        let key = name_key(name);
        rows.values().any(|r| r.id != except && r.first_name_key == key)
    }

    #[async_trait]
    impl VillaRepository for MockVillaRepository {
        async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
            Ok(self.lock().rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
            Ok(self.lock().rows.get(&id).cloned())
        }

        async fn find_by_first_name(&self, first_name: &str) -> Result<Option<Model>, ServiceError> {
            let key = name_key(first_name);
            Ok(self.lock().rows.values().find(|r| r.first_name_key == key).cloned())
        }

        async fn insert(&self, mut villa: Model) -> Result<Model, ServiceError> {
            let mut state = self.lock();
            if name_taken(&state.rows, &villa.first_name, 0) {
                return Err(ServiceError::invalid("villa already exists"));
            }
            state.last_id += 1;
            villa.id = state.last_id;
            villa.first_name_key = name_key(&villa.first_name);
            state.rows.insert(villa.id, villa.clone());
            state.writes += 1;
            Ok(villa)
        }

        async fn update(&self, mut villa: Model) -> Result<Model, ServiceError> {
            let mut state = self.lock();
            if !state.rows.contains_key(&villa.id) {
                return Err(ServiceError::not_found("villa"));
            }
            if name_taken(&state.rows, &villa.first_name, villa.id) {
                return Err(ServiceError::invalid("villa already exists"));
            }
            villa.first_name_key = name_key(&villa.first_name);
            state.rows.insert(villa.id, villa.clone());
            state.writes += 1;
            Ok(villa)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut state = self.lock();
            let removed = state.rows.remove(&id).is_some();
            if removed { state.writes += 1; }
            Ok(removed)
        }
    }
}
