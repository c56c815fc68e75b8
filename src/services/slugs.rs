use std::collections::HashSet;

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QuerySelect, SqlErr,
};

use crate::{error::AppResult, services::catalog_service::escape_like, slug::disambiguate};

/// Writes tried before a slug race is reported as an error.
pub const SLUG_ATTEMPTS: usize = 10;

#[derive(Debug, FromQueryResult)]
struct SlugRow {
    slug: String,
}

/// Resolves slug collisions for entity `E` by appending the smallest free
/// `-N` suffix. The row identified by `own_id` does not count as a collision.
pub async fn unique_slug<E, C>(
    db: &C,
    slug_col: E::Column,
    id_col: E::Column,
    base: &str,
    own_id: Option<i32>,
) -> AppResult<String>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut query = E::find()
        .select_only()
        .column_as(slug_col, "slug")
        .filter(
            Condition::any()
                .add(slug_col.eq(base))
                .add(slug_col.like(format!("{}-%", escape_like(base)))),
        );
    if let Some(id) = own_id {
        query = query.filter(id_col.ne(id));
    }

    let taken: HashSet<String> = query
        .into_model::<SlugRow>()
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.slug)
        .collect();

    let slug = disambiguate(base, |candidate| taken.contains(candidate));
    if slug != base {
        tracing::debug!(base, slug = %slug, "slug collision resolved");
    }
    Ok(slug)
}

/// True when `err` is a unique violation on a slug column.
pub fn is_slug_conflict(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("slug")
    )
}

/// Lets a write that lost a slug race run again with a fresh slug. Any other
/// error, or the last allowed attempt, is returned to the caller.
pub fn retry_slug(err: DbErr, attempt: &mut usize) -> AppResult<()> {
    if *attempt < SLUG_ATTEMPTS && is_slug_conflict(&err) {
        tracing::debug!(attempt = *attempt, "slug taken concurrently, retrying");
        *attempt += 1;
        Ok(())
    } else {
        Err(err.into())
    }
}
