use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::domain::VillaTransfer;
use super::patch::{self, PatchOperation};
use super::repository::VillaRepository;
use crate::errors::ServiceError;

/// Villa business service independent of web framework.
pub struct VillaService<R: VillaRepository> {
    repo: Arc<R>,
}

impl<R: VillaRepository> VillaService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All villas in storage order.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<VillaTransfer>, ServiceError> {
        let rows = self.repo.find_all().await?;
        debug!(count = rows.len(), "villas_listed");
        Ok(rows.into_iter().map(VillaTransfer::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<VillaTransfer, ServiceError> {
        if id == 0 {
            warn!(id, "villa_lookup_with_zero_id");
            return Err(ServiceError::invalid("id must not be 0"));
        }
        self.repo
            .find_by_id(id)
            .await?
            .map(VillaTransfer::from)
            .ok_or_else(|| ServiceError::not_found("villa"))
    }

    /// Create a villa; the returned id is the one storage assigned.
    ///
    /// # Examples
    /// ```
    /// use service::villa::{repository::mock::MockVillaRepository, VillaService, VillaTransfer};
    /// use std::sync::Arc;
    /// let svc = VillaService::new(Arc::new(MockVillaRepository::default()));
    /// let input = VillaTransfer { first_name: "Lake House".into(), rate: 199.99, occupancy: 4, ..Default::default() };
    /// let created = tokio_test::block_on(svc.create(Some(input))).unwrap();
    /// assert_eq!(created.id, 1);
    /// ```
    #[instrument(skip(self, transfer))]
    pub async fn create(&self, transfer: Option<VillaTransfer>) -> Result<VillaTransfer, ServiceError> {
        let transfer = transfer.ok_or_else(|| ServiceError::invalid("villa body is required"))?;
        if transfer.id != 0 {
            warn!(id = transfer.id, "villa_create_with_preassigned_id");
            return Err(ServiceError::PreassignedId);
        }
        transfer.validate()?;
        if self.repo.find_by_first_name(&transfer.first_name).await?.is_some() {
            debug!(first_name = %transfer.first_name, "villa_name_taken");
            return Err(ServiceError::invalid("villa already exists"));
        }

        let created = self.repo.insert(transfer.into_model()).await?;
        info!(id = created.id, first_name = %created.first_name, "villa_created");
        Ok(created.into())
    }

    /// Overwrite the full record. A missing id fails with `NotFound`.
    #[instrument(skip(self, transfer))]
    pub async fn replace(&self, id: i32, transfer: Option<VillaTransfer>) -> Result<(), ServiceError> {
        let transfer = transfer.ok_or_else(|| ServiceError::invalid("villa body is required"))?;
        if transfer.id != id {
            return Err(ServiceError::invalid(format!("path id {id} does not match body id {}", transfer.id)));
        }
        transfer.validate()?;

        self.repo.update(transfer.into_model()).await?;
        info!(id, "villa_replaced");
        Ok(())
    }

    /// Apply a JSON Patch to a detached snapshot and store it. Nothing is
    /// written unless the patch and the resulting record are both valid.
    ///
    /// # Examples
    /// ```
    /// use service::villa::{repository::mock::MockVillaRepository, PatchOperation, VillaService, VillaTransfer};
    /// use std::sync::Arc;
    /// let svc = VillaService::new(Arc::new(MockVillaRepository::default()));
    /// let input = VillaTransfer { first_name: "Lake House".into(), rate: 199.99, ..Default::default() };
    /// let created = tokio_test::block_on(svc.create(Some(input))).unwrap();
    /// let ops = vec![PatchOperation::Replace { path: "/occupancy".into(), value: serde_json::json!(6) }];
    /// let patched = tokio_test::block_on(svc.patch_partial(created.id, Some(ops))).unwrap();
    /// assert_eq!(patched.occupancy, 6);
    /// ```
    #[instrument(skip(self, ops))]
    pub async fn patch_partial(&self, id: i32, ops: Option<Vec<PatchOperation>>) -> Result<VillaTransfer, ServiceError> {
        let ops = ops.ok_or_else(|| ServiceError::invalid("patch document is required"))?;
        if id == 0 {
            return Err(ServiceError::invalid("id must not be 0"));
        }
        let snapshot: VillaTransfer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::invalid(format!("villa {id} does not exist")))?
            .into();

        let patched = patch::apply(&snapshot, &ops).map_err(|errors| {
            warn!(id, %errors, "villa_patch_rejected");
            ServiceError::from(errors)
        })?;
        patched.validate()?;

        let stored = self.repo.update(patched.into_model()).await?;
        info!(id, ops = ops.len(), "villa_patched");
        Ok(stored.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if id == 0 {
            return Err(ServiceError::invalid("id must not be 0"));
        }
        if self.repo.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("villa"));
        }
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("villa"));
        }
        info!(id, "villa_deleted");
        Ok(())
    }
}
