//! PostgreSQL-backed [`ShelterStore`] built on the startup schema
//! catalog and the dynamic statements in [`nearby_sql`].
//!
//! [`nearby_sql`]: super::nearby_sql

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::sql_types::{Array, BigInt, Double, Integer, Json, Nullable, Text};
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::debug;

use crate::domain::kind::ShelterKind;
use crate::domain::ports::{ShelterStore, ShelterStoreError};
use crate::domain::shelter::{NearbyQuery, NearbyShelter, ShelterSummary};

use super::introspection::SchemaCatalog;
use super::nearby_sql;
use super::pool::{DbPool, PoolError};

/// Dynamic-SQL implementation of the [`ShelterStore`] port.
#[derive(Clone)]
pub struct DieselShelterStore {
    pool: DbPool,
    catalog: SchemaCatalog,
}

impl DieselShelterStore {
    /// Create a store over the given pool and resolved catalog.
    pub fn new(pool: DbPool, catalog: SchemaCatalog) -> Self {
        Self { pool, catalog }
    }
}

fn map_pool_error(error: PoolError) -> ShelterStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ShelterStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ShelterStoreError {
    debug!(error = %error, "shelter query failed");
    ShelterStoreError::query("database error")
}

#[derive(diesel::QueryableByName)]
struct NearbyRow {
    #[diesel(sql_type = Text)]
    id: String,
    #[diesel(sql_type = Text)]
    kind: String,
    #[diesel(sql_type = Double)]
    latitude: f64,
    #[diesel(sql_type = Double)]
    longitude: f64,
    #[diesel(sql_type = Double)]
    distance_m: f64,
    #[diesel(sql_type = Nullable<Text>)]
    name: Option<String>,
    #[diesel(sql_type = Nullable<Json>)]
    props: Option<Value>,
}

impl NearbyRow {
    fn into_shelter(self) -> Result<NearbyShelter, ShelterStoreError> {
        // The kind column is one of our own literals; failing to parse
        // it back means the statement builder is broken.
        let kind = ShelterKind::parse(&self.kind).ok_or_else(|| {
            ShelterStoreError::query(format!("unexpected kind tag in result: {}", self.kind))
        })?;
        Ok(NearbyShelter {
            id: self.id,
            kind,
            latitude: self.latitude,
            longitude: self.longitude,
            distance_m: self.distance_m,
            name: self.name,
            props: self.props,
        })
    }
}

#[derive(diesel::QueryableByName)]
struct DetailRow {
    #[diesel(sql_type = Json)]
    detail: Value,
}

#[derive(diesel::QueryableByName)]
struct PresenceRow {
    #[diesel(sql_type = Integer)]
    #[allow(dead_code, reason = "deserialization target only")]
    present: i32,
}

#[derive(diesel::QueryableByName)]
struct SummaryRow {
    #[diesel(sql_type = BigInt)]
    native_id: i64,
    #[diesel(sql_type = Text)]
    id: String,
    #[diesel(sql_type = Text)]
    kind: String,
    #[diesel(sql_type = Double)]
    latitude: f64,
    #[diesel(sql_type = Double)]
    longitude: f64,
    #[diesel(sql_type = Nullable<Text>)]
    name: Option<String>,
    #[diesel(sql_type = Nullable<Json>)]
    props: Option<Value>,
}

#[async_trait]
impl ShelterStore for DieselShelterStore {
    async fn search_nearby(
        &self,
        query: &NearbyQuery,
    ) -> Result<Vec<NearbyShelter>, ShelterStoreError> {
        let schemas: Vec<_> = query
            .kinds
            .iter()
            .filter_map(|kind| self.catalog.get(*kind).map(|schema| (*kind, schema)))
            .collect();
        let Some(sql) = nearby_sql::nearby_union(&schemas, query) else {
            return Ok(Vec::new());
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<NearbyRow> = diesel::sql_query(sql)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(NearbyRow::into_shelter).collect()
    }

    async fn fetch_detail(
        &self,
        kind: ShelterKind,
        id: i64,
    ) -> Result<Option<Value>, ShelterStoreError> {
        let Some(sql) = self.catalog.get(kind).and_then(nearby_sql::detail_select) else {
            // No native id column: nothing addressable by id.
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DetailRow> = diesel::sql_query(sql)
            .bind::<BigInt, _>(id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().next().map(|row| row.detail))
    }

    async fn exists(&self, kind: ShelterKind, id: i64) -> Result<bool, ShelterStoreError> {
        let Some(sql) = self.catalog.get(kind).and_then(nearby_sql::exists_select) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PresenceRow> = diesel::sql_query(sql)
            .bind::<BigInt, _>(id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(!rows.is_empty())
    }

    async fn summaries_by_ids(
        &self,
        kind: ShelterKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, ShelterSummary>, ShelterStoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let Some(sql) = self
            .catalog
            .get(kind)
            .and_then(|schema| nearby_sql::summaries_select(schema, kind))
        else {
            return Ok(HashMap::new());
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<SummaryRow> = diesel::sql_query(sql)
            .bind::<Array<BigInt>, _>(ids.to_vec())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let mut summaries = HashMap::with_capacity(rows.len());
        for row in rows {
            let kind = ShelterKind::parse(&row.kind).ok_or_else(|| {
                ShelterStoreError::query(format!("unexpected kind tag in result: {}", row.kind))
            })?;
            summaries.insert(
                row.native_id,
                ShelterSummary {
                    id: row.id,
                    kind,
                    latitude: row.latitude,
                    longitude: row.longitude,
                    name: row.name,
                    props: row.props,
                },
            );
        }
        Ok(summaries)
    }
}
