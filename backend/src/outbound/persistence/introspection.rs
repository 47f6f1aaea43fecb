//! Startup schema discovery for the shelter tables.
//!
//! Physical schemas are static, so discovery runs once: each whitelisted
//! table's columns are read from `information_schema` in ordinal order
//! and resolved into a [`TableSchema`]. A table with undiscoverable
//! geometry aborts startup — serving a kind whose distance ranking
//! would be garbage is worse than failing fast.

use std::collections::HashMap;

use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::kind::ShelterKind;
use crate::domain::schema::{SchemaError, TableSchema};

use super::pool::{DbPool, PoolError};

/// Errors raised while building the schema catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Could not obtain a connection.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The introspection query itself failed.
    #[error("failed to introspect {table}: {source}")]
    Introspection {
        /// Table being introspected.
        table: &'static str,
        /// Underlying diesel error.
        source: diesel::result::Error,
    },
    /// The table is absent from the database.
    #[error("shelter table {table} does not exist")]
    MissingTable {
        /// The missing table.
        table: &'static str,
    },
    /// The table exists but its geometry columns are unresolvable.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(diesel::QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Text)]
    column_name: String,
}

/// Resolved schemas for every shelter kind, built once at startup.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    schemas: HashMap<ShelterKind, TableSchema>,
}

impl SchemaCatalog {
    /// Introspect and resolve every whitelisted shelter table.
    pub async fn load(pool: &DbPool) -> Result<Self, CatalogError> {
        let mut conn = pool.get().await?;
        let mut schemas = HashMap::new();
        for kind in ShelterKind::ALL {
            let table = kind.table();
            let rows: Vec<ColumnRow> = diesel::sql_query(
                "SELECT column_name::text AS column_name \
                 FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = $1 \
                 ORDER BY ordinal_position",
            )
            .bind::<Text, _>(table)
            .load(&mut conn)
            .await
            .map_err(|source| CatalogError::Introspection { table, source })?;

            if rows.is_empty() {
                return Err(CatalogError::MissingTable { table });
            }
            let columns: Vec<String> = rows.into_iter().map(|row| row.column_name).collect();
            let schema = TableSchema::resolve(kind, &columns)?;
            info!(
                kind = %kind,
                table,
                lat = %schema.lat_col,
                lng = %schema.lng_col,
                native_id = schema.has_native_id(),
                "resolved shelter table schema"
            );
            schemas.insert(kind, schema);
        }
        Ok(Self { schemas })
    }

    /// Build a catalog from pre-resolved schemas (tests, fixtures).
    pub fn from_schemas(schemas: HashMap<ShelterKind, TableSchema>) -> Self {
        Self { schemas }
    }

    /// The resolved schema for a kind.
    ///
    /// Every kind is resolved at startup, so this only returns `None`
    /// for catalogs constructed with a partial map in tests.
    pub fn get(&self, kind: ShelterKind) -> Option<&TableSchema> {
        self.schemas.get(&kind)
    }
}
