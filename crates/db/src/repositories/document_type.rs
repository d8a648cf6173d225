//! Document type repository for the request catalog.

use campusdesk_core::forms::DocumentTypeForm;
use campusdesk_core::listing::like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::info;
use uuid::Uuid;

use super::error::{RepositoryError, is_foreign_key_violation, is_unique_violation};
use super::search::lower_like;
use crate::entities::{document_requests, document_types};

const DUPLICATE_NAME: &str = "Document type with this name already exists.";

/// Document type repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct DocumentTypeRepository {
    db: DatabaseConnection,
}

impl DocumentTypeRepository {
    /// Creates a new document type repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists document types ordered by name.
    ///
    /// Inactive types are hidden unless `include_inactive` is set (staff).
    /// `term` matches the name case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        include_inactive: bool,
        term: Option<&str>,
    ) -> Result<Vec<document_types::Model>, RepositoryError> {
        let mut query = document_types::Entity::find().order_by_asc(document_types::Column::Name);

        if !include_inactive {
            query = query.filter(document_types::Column::IsActive.eq(true));
        }
        if let Some(term) = term {
            query = query.filter(lower_like(
                (document_types::Entity, document_types::Column::Name),
                &like_pattern(term),
            ));
        }

        Ok(query.all(&self.db).await?)
    }

    /// Finds a document type by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such type exists.
    pub async fn get(&self, id: Uuid) -> Result<document_types::Model, RepositoryError> {
        document_types::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(RepositoryError::NotFound("Document type"))
    }

    /// Creates a document type.
    ///
    /// # Errors
    ///
    /// Returns a validation error on `name` if the name is taken.
    pub async fn create(
        &self,
        form: DocumentTypeForm,
    ) -> Result<document_types::Model, RepositoryError> {
        self.ensure_name_free(&form.name, None).await?;

        let document_type = document_types::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(form.name),
            fee: Set(form.fee),
            processing_days: Set(form.processing_days),
            is_active: Set(form.is_active),
            created_at: Set(chrono::Utc::now().into()),
        };

        let created = document_type.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::invalid_field("name", DUPLICATE_NAME)
            } else {
                e.into()
            }
        })?;

        info!(document_type_id = %created.id, name = %created.name, "Document type created");
        Ok(created)
    }

    /// Replaces a document type's fields.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Document type not found
    /// - New name is taken by another type
    pub async fn update(
        &self,
        id: Uuid,
        form: DocumentTypeForm,
    ) -> Result<document_types::Model, RepositoryError> {
        let existing = self.get(id).await?;
        if form.name != existing.name {
            self.ensure_name_free(&form.name, Some(id)).await?;
        }

        let mut active: document_types::ActiveModel = existing.into();
        active.name = Set(form.name);
        active.fee = Set(form.fee);
        active.processing_days = Set(form.processing_days);
        active.is_active = Set(form.is_active);

        let updated = active.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                RepositoryError::invalid_field("name", DUPLICATE_NAME)
            } else {
                e.into()
            }
        })?;

        info!(document_type_id = %id, "Document type updated");
        Ok(updated)
    }

    /// Deletes a document type that no request references.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Document type not found
    /// - Any document request references it
    pub async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let existing = self.get(id).await?;

        let references = document_requests::Entity::find()
            .filter(document_requests::Column::DocumentTypeId.eq(id))
            .count(&self.db)
            .await?;
        if references > 0 {
            return Err(RepositoryError::DocumentTypeInUse);
        }

        existing.delete(&self.db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                RepositoryError::DocumentTypeInUse
            } else {
                e.into()
            }
        })?;

        info!(document_type_id = %id, "Document type deleted");
        Ok(())
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        except: Option<Uuid>,
    ) -> Result<(), RepositoryError> {
        let mut query =
            document_types::Entity::find().filter(document_types::Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(document_types::Column::Id.ne(id));
        }

        if query.count(&self.db).await? > 0 {
            return Err(RepositoryError::invalid_field("name", DUPLICATE_NAME));
        }
        Ok(())
    }
}
