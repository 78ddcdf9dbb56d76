//! Post-migration schema verification.
//!
//! Runs a fixed sequence of read-only checks against the catalog and
//! collects the outcomes into a [`VerificationReport`]. A query error aborts
//! the sequence and is returned to the caller.

use gearshare_core::verification::{CheckDetail, CheckOutcome, VerificationReport, VerifyTargets};

use crate::catalog::CatalogRepo;
use crate::DbPool;

/// Run all checks in order:
///
/// 1. column exists on the table (type and default)
/// 2. enum type exists (labels, sorted; empty when the type is missing)
/// 3. index exists on the table (definition)
/// 4. row counts grouped by the column
///
/// Check 4 is skipped, and reported as failed, when check 1 found no
/// column.
pub async fn verify(
    pool: &DbPool,
    targets: &VerifyTargets,
) -> Result<VerificationReport, sqlx::Error> {
    let VerifyTargets {
        schema,
        table,
        column,
        enum_type,
        index,
    } = targets;
    let mut report = VerificationReport::default();

    let column_name = format!("column {schema}.{table}.{column}");
    let column_info = CatalogRepo::find_column(pool, schema, table, column).await?;
    tracing::debug!(found = column_info.is_some(), "Checked {column_name}");
    report.push(match &column_info {
        Some(info) => CheckOutcome::passed(
            column_name,
            CheckDetail::Column {
                data_type: info.udt_name.clone(),
                default: info.column_default.clone(),
            },
        ),
        None => CheckOutcome::failed(column_name),
    });

    let enum_name = format!("enum {schema}.{enum_type}");
    let labels = CatalogRepo::enum_labels(pool, schema, enum_type).await?;
    tracing::debug!(found = labels.is_some(), "Checked {enum_name}");
    report.push(match labels {
        Some(labels) => CheckOutcome::passed(enum_name, CheckDetail::EnumLabels { labels }),
        None => CheckOutcome::failed_with(enum_name, CheckDetail::EnumLabels { labels: vec![] }),
    });

    let index_name = format!("index {index} on {schema}.{table}");
    let definition = CatalogRepo::index_definition(pool, schema, table, index).await?;
    tracing::debug!(found = definition.is_some(), "Checked {index_name}");
    report.push(match definition {
        Some(definition) => CheckOutcome::passed(index_name, CheckDetail::Index { definition }),
        None => CheckOutcome::failed(index_name),
    });

    let counts_name = format!("row counts {schema}.{table} by {column}");
    if column_info.is_some() {
        let groups = CatalogRepo::group_counts(pool, schema, table, column).await?;
        tracing::debug!(groups = groups.len(), "Checked {counts_name}");
        report.push(CheckOutcome::passed(
            counts_name,
            CheckDetail::RowCounts { groups },
        ));
    } else {
        tracing::debug!("Skipped {counts_name}: column missing");
        report.push(CheckOutcome::failed(counts_name));
    }

    Ok(report)
}
