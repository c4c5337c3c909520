use std::collections::HashMap;

use async_trait::async_trait;
use ranking_shared::types::{TargetKind, TargetRef, VoteChange, VoteValue, VotesCount};
use uuid::Uuid;

use crate::{VotesRepository, VotesRepositoryError};

/// PostgreSQL implementation of the vote ledger.
///
/// The `(voter_id, target_id, target_kind)` primary key enforces the
/// one-record-per-voter-per-target invariant; upserts replace the value.
pub struct PostgresVotesRepository {
    pool: sqlx::PgPool,
}

impl PostgresVotesRepository {
    /// Creates a new PostgreSQL votes repository.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with required schema
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Upserts or deletes each record within an active transaction.
    async fn apply_changes_tx(
        &self,
        changes: &[VoteChange],
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), VotesRepositoryError> {
        for change in changes {
            match change {
                VoteChange::Upsert(record) => {
                    sqlx::query(
                        r#"
                        INSERT INTO votes (voter_id, target_id, target_kind, value, voted_at)
                        VALUES ($1, $2, $3, $4, $5)
                        ON CONFLICT (voter_id, target_id, target_kind)
                        DO UPDATE SET
                            value = EXCLUDED.value,
                            voted_at = EXCLUDED.voted_at
                        "#,
                    )
                    .bind(record.voter_id)
                    .bind(record.target.id)
                    .bind(record.target.kind.as_i16())
                    .bind(record.value.as_i16())
                    .bind(record.voted_at)
                    .execute(&mut **tx)
                    .await
                    .map_err(|err| write_error(err, record.target))?;
                }
                VoteChange::Clear { voter_id, target } => {
                    sqlx::query(
                        r#"
                        DELETE FROM votes
                        WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3
                        "#,
                    )
                    .bind(voter_id)
                    .bind(target.id)
                    .bind(target.kind.as_i16())
                    .execute(&mut **tx)
                    .await?;
                }
            }
        }
        Ok(())
    }
}

fn target_arrays(targets: &[TargetRef]) -> (Vec<Uuid>, Vec<i16>) {
    targets.iter().map(|t| (t.id, t.kind.as_i16())).unzip()
}

/// A foreign key violation means the target is not a stored item.
fn write_error(err: sqlx::Error, target: TargetRef) -> VotesRepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            VotesRepositoryError::UnknownTarget(target)
        }
        _ => VotesRepositoryError::DatabaseError(err),
    }
}

fn decode_kind(kind: i16) -> Result<TargetKind, VotesRepositoryError> {
    TargetKind::try_from(kind).map_err(|_| VotesRepositoryError::InvalidTargetKind(kind))
}

fn decode_count(count: i64) -> Result<u64, VotesRepositoryError> {
    u64::try_from(count).map_err(|_| VotesRepositoryError::InvalidCount(count))
}

#[async_trait]
impl VotesRepository for PostgresVotesRepository {
    /// Tallies all targets with a single grouped query.
    ///
    /// Uses PostgreSQL's `UNNEST` to match every requested target at once and
    /// `COUNT(*) FILTER` to split up and down votes per group.
    async fn tally_votes(
        &self,
        targets: &[TargetRef],
    ) -> Result<HashMap<TargetRef, VotesCount>, VotesRepositoryError> {
        let mut tallies: HashMap<TargetRef, VotesCount> = targets
            .iter()
            .map(|target| (*target, VotesCount::default()))
            .collect();

        if targets.is_empty() {
            return Ok(tallies);
        }

        let (target_ids, target_kinds) = target_arrays(targets);

        let rows: Vec<(Uuid, i16, i64, i64)> = sqlx::query_as(
            r#"
            SELECT target_id,
                   target_kind,
                   COUNT(*) FILTER (WHERE value = 1)  AS upvotes,
                   COUNT(*) FILTER (WHERE value = -1) AS downvotes
            FROM votes
            WHERE (target_id, target_kind) IN (SELECT * FROM UNNEST($1::uuid[], $2::smallint[]))
            GROUP BY target_id, target_kind
            "#,
        )
        .bind(&target_ids)
        .bind(&target_kinds)
        .fetch_all(&self.pool)
        .await?;

        for (target_id, target_kind, upvotes, downvotes) in rows {
            let target = TargetRef::new(target_id, decode_kind(target_kind)?);
            tallies.insert(
                target,
                VotesCount::new(decode_count(upvotes)?, decode_count(downvotes)?),
            );
        }

        Ok(tallies)
    }

    /// Serializes concurrent swaps on the same `(voter, target)` with a
    /// transaction-scoped advisory lock, then reads and writes in that transaction.
    async fn swap_vote(
        &self,
        change: &VoteChange,
    ) -> Result<Option<VoteValue>, VotesRepositoryError> {
        let voter_id = change.voter_id();
        let target = change.target();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            SELECT pg_advisory_xact_lock(
                hashtextextended($1::uuid::text || ':' || $2::uuid::text, $3::bigint)
            )
            "#,
        )
        .bind(voter_id)
        .bind(target.id)
        .bind(i64::from(target.kind.as_i16()))
        .execute(&mut *tx)
        .await?;

        let previous: Option<i16> = sqlx::query_scalar(
            r#"
            SELECT value
            FROM votes
            WHERE voter_id = $1 AND target_id = $2 AND target_kind = $3
            "#,
        )
        .bind(voter_id)
        .bind(target.id)
        .bind(target.kind.as_i16())
        .fetch_optional(&mut *tx)
        .await?;

        self.apply_changes_tx(std::slice::from_ref(change), &mut tx).await?;
        tx.commit().await?;

        previous
            .map(|value| {
                VoteValue::try_from(value).map_err(|_| VotesRepositoryError::InvalidVoteValue(value))
            })
            .transpose()
    }

    /// Applies the whole batch in one transaction; on failure it is rolled back.
    async fn apply_changes(&self, changes: &[VoteChange]) -> Result<(), VotesRepositoryError> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        self.apply_changes_tx(changes, &mut tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
