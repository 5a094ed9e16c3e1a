use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QuerySelect, SqlErr,
};

use crate::error::AppError;

/// A table of `key -> suffix` counters used to mint unique slug suffixes.
///
/// Counters only move up. A suffix handed out for a key is never handed out
/// again, even if the entity that used it is renamed or deleted.
pub trait RatchetEntity: EntityTrait {
    fn key_column() -> Self::Column;
    fn suffix_column() -> Self::Column;
}

/// Increments the counter for `key` and returns the new value, creating the
/// row at 1 on first use.
///
/// Must run inside the transaction of the save that consumes the suffix: the
/// `UPDATE` holds the row lock until that transaction ends, so concurrent
/// reservations for the same key serialize. Two writers racing to create the
/// same row collide on the unique key; the loser gets
/// [`AppError::RatchetContention`] and must retry its whole transaction.
pub async fn reserve<E, C>(db: &C, key: &str) -> Result<u32, AppError>
where
    E: RatchetEntity,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
    C: ConnectionTrait,
{
    let suffix = E::suffix_column();

    let bumped = E::update_many()
        .col_expr(suffix, Expr::col(suffix).add(1))
        .filter(E::key_column().eq(key))
        .exec(db)
        .await?;

    if bumped.rows_affected == 0 {
        let mut row = <E::ActiveModel as ActiveModelTrait>::default();
        row.set(E::key_column(), key.into());
        row.set(suffix, 1i32.into());

        return match E::insert(row).exec_without_returning(db).await {
            Ok(_) => {
                tracing::debug!(key, suffix = 1, "Ratchet created");
                Ok(1)
            }
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::RatchetContention(key.to_string()))
                }
                _ => Err(err.into()),
            },
        };
    }

    let value: Option<i32> = E::find()
        .select_only()
        .column(suffix)
        .filter(E::key_column().eq(key))
        .into_tuple()
        .one(db)
        .await?;

    let value = value.ok_or_else(|| {
        AppError::InternalServerError(format!("Ratchet row for '{}' vanished", key))
    })?;
    tracing::debug!(key, suffix = value, "Ratchet advanced");

    u32::try_from(value)
        .map_err(|_| AppError::InternalServerError(format!("Ratchet for '{}' is negative", key)))
}
