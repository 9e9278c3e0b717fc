use rusqlite::{Connection, ToSql};
use tracing::{debug, info};

use crate::document::Document;
use crate::error::ImportError;
use crate::normalize::normalize;
use crate::sql::build_upsert;

/// Outcome of a committed run. `groups` counts executed upserts, `rows`
/// sums the driver-reported affected rows, `skipped` counts field-less
/// groups that never touched the database.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub groups: usize,
    pub rows: usize,
    pub skipped: usize,
}

/// Upsert every record group of `doc` inside one transaction.
///
/// The whole document commits or nothing does: the first prepare/execute
/// failure aborts the run, and dropping the transaction on that early
/// return rolls back everything already written.
pub fn import_all(conn: &Connection, doc: &Document) -> Result<ImportSummary, ImportError> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|source| ImportError::Connection { source })?;

    let mut summary = ImportSummary::default();

    for group in doc.groups() {
        if group.fields.is_empty() {
            debug!("skipping `{}`: no fields", group.name);
            summary.skipped += 1;
            continue;
        }

        let columns: Vec<String> = group.fields.iter().map(|f| f.name.clone()).collect();
        let values: Vec<Option<String>> = group
            .fields
            .iter()
            .map(|f| normalize(f.value.as_deref()))
            .collect();

        let stmt = build_upsert(&group.name, &columns);
        debug!("upserting `{}` ({} columns)", group.name, columns.len());

        let stage = format!("table `{}`", group.name);
        let mut prepared = tx
            .prepare(&stmt.sql)
            .map_err(|e| ImportError::execution(stage.as_str(), e))?;

        let bind: Vec<(&str, &dyn ToSql)> = stmt
            .params
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();

        let changed = prepared
            .execute(bind.as_slice())
            .map_err(|e| ImportError::execution(stage.as_str(), e))?;

        summary.groups += 1;
        summary.rows += changed;
    }

    tx.commit()
        .map_err(|e| ImportError::execution("commit", e))?;

    info!(
        "committed {} groups ({} rows, {} skipped)",
        summary.groups, summary.rows, summary.skipped
    );
    Ok(summary)
}
