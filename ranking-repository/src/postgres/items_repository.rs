use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ranking_shared::types::{Item, TargetKind, TargetRef};
use uuid::Uuid;

use crate::{ItemsRepository, ItemsRepositoryError};

/// PostgreSQL implementation of item storage.
pub struct PostgresItemsRepository {
    pool: sqlx::PgPool,
}

impl PostgresItemsRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemsRepository for PostgresItemsRepository {
    async fn list_items(
        &self,
        kind: TargetKind,
        scope: &str,
    ) -> Result<Vec<Item>, ItemsRepositoryError> {
        let rows: Vec<(Uuid, i16, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, kind, scope, created_at
            FROM items
            WHERE kind = $1 AND scope = $2
            ORDER BY created_at, id
            "#,
        )
        .bind(kind.as_i16())
        .bind(scope)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, kind, scope, created_at)| {
                Ok(Item {
                    id,
                    kind: TargetKind::try_from(kind)
                        .map_err(|_| ItemsRepositoryError::InvalidTargetKind(kind))?,
                    scope,
                    created_at,
                })
            })
            .collect()
    }

    async fn existing_targets(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashSet<TargetRef>, ItemsRepositoryError> {
        if targets.is_empty() {
            return Ok(HashSet::new());
        }

        let (ids, kinds): (Vec<Uuid>, Vec<i16>) =
            targets.iter().map(|t| (t.id, t.kind.as_i16())).unzip();

        let rows: Vec<(Uuid, i16)> = sqlx::query_as(
            r#"
            SELECT id, kind
            FROM items
            WHERE (id, kind) IN (SELECT * FROM UNNEST($1::uuid[], $2::smallint[]))
            "#,
        )
        .bind(&ids)
        .bind(&kinds)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, kind)| {
                let kind = TargetKind::try_from(kind)
                    .map_err(|_| ItemsRepositoryError::InvalidTargetKind(kind))?;
                Ok(TargetRef::new(id, kind))
            })
            .collect()
    }

    /// Bulk inserts with `QueryBuilder`; existing ids are left untouched.
    async fn insert_items(&self, items: &[Item]) -> Result<(), ItemsRepositoryError> {
        if items.is_empty() {
            return Ok(());
        }

        let mut query_builder =
            sqlx::QueryBuilder::new("INSERT INTO items (id, kind, scope, created_at) ");

        query_builder.push_values(items, |mut b, item| {
            b.push_bind(item.id)
                .push_bind(item.kind.as_i16())
                .push_bind(item.scope.clone())
                .push_bind(item.created_at);
        });
        query_builder.push(" ON CONFLICT (id) DO NOTHING");

        query_builder.build().execute(&self.pool).await?;
        Ok(())
    }
}
