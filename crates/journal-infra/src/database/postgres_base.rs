use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{EntityTrait, PrimaryKeyTrait};

use journal_core::error::RepoError;
use journal_core::ports::BaseRepository;

use super::resilient::{ResilientDb, repo_error};

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<ResilientDb>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<ResilientDb>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = self
            .db
            .run(move |conn| async move { E::find_by_id(id).one(&*conn).await })
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: ID) -> Result<bool, RepoError> {
        let result = self
            .db
            .run(move |conn| async move { E::delete_by_id(id).exec(&*conn).await })
            .await
            .map_err(repo_error)?;

        Ok(result.rows_affected > 0)
    }
}
