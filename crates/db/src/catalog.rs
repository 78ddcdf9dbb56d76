//! Read-only catalog introspection queries.

use gearshare_core::sql::Ident;
use gearshare_core::verification::GroupCount;

use crate::DbPool;

/// Column metadata from `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ColumnInfo {
    /// Underlying type name, e.g. `int8` or the enum's name.
    pub udt_name: String,
    pub column_default: Option<String>,
}

/// Lookups against `information_schema` and `pg_catalog`.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Find a column on a table. Returns `None` if it does not exist.
    pub async fn find_column(
        pool: &DbPool,
        schema: &Ident,
        table: &Ident,
        column: &Ident,
    ) -> Result<Option<ColumnInfo>, sqlx::Error> {
        sqlx::query_as::<_, ColumnInfo>(
            "SELECT udt_name::text AS udt_name, column_default::text AS column_default \
             FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 AND column_name = $3",
        )
        .bind(schema.as_str())
        .bind(table.as_str())
        .bind(column.as_str())
        .fetch_optional(pool)
        .await
    }

    /// Labels of an enum type in byte-wise lexicographic order, or `None`
    /// if no enum type with that name exists in `schema`.
    pub async fn enum_labels(
        pool: &DbPool,
        schema: &Ident,
        enum_type: &Ident,
    ) -> Result<Option<Vec<String>>, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS ( \
                 SELECT 1 FROM pg_type t \
                 JOIN pg_namespace n ON n.oid = t.typnamespace \
                 WHERE n.nspname = $1 AND t.typname = $2 AND t.typtype = 'e' \
             )",
        )
        .bind(schema.as_str())
        .bind(enum_type.as_str())
        .fetch_one(pool)
        .await?;

        if !exists {
            return Ok(None);
        }

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT e.enumlabel::text \
             FROM pg_type t \
             JOIN pg_namespace n ON n.oid = t.typnamespace \
             JOIN pg_enum e ON e.enumtypid = t.oid \
             WHERE n.nspname = $1 AND t.typname = $2 \
             ORDER BY e.enumlabel::text COLLATE \"C\"",
        )
        .bind(schema.as_str())
        .bind(enum_type.as_str())
        .fetch_all(pool)
        .await?;

        Ok(Some(rows.into_iter().map(|(label,)| label).collect()))
    }

    /// Definition of an index on a table. Returns `None` if it does not exist.
    pub async fn index_definition(
        pool: &DbPool,
        schema: &Ident,
        table: &Ident,
        index: &Ident,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT indexdef FROM pg_indexes \
             WHERE schemaname = $1 AND tablename = $2 AND indexname = $3",
        )
        .bind(schema.as_str())
        .bind(table.as_str())
        .bind(index.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|(definition,)| definition))
    }

    /// Row counts per distinct value of `column`, ordered by that column.
    ///
    /// Names cannot be bound as parameters here, so they are spliced in
    /// quoted form.
    pub async fn group_counts(
        pool: &DbPool,
        schema: &Ident,
        table: &Ident,
        column: &Ident,
    ) -> Result<Vec<GroupCount>, sqlx::Error> {
        let column = column.quoted();
        let query = format!(
            "SELECT {column}::text, COUNT(*) FROM {}.{} GROUP BY {column} ORDER BY {column}",
            schema.quoted(),
            table.quoted(),
        );

        let rows: Vec<(Option<String>, i64)> = sqlx::query_as(&query).fetch_all(pool).await?;

        Ok(rows
            .into_iter()
            .map(|(value, count)| GroupCount { value, count })
            .collect())
    }
}
