//! Per-table schema descriptors for the heterogeneous shelter tables.
//!
//! The four shelter tables were ingested from different upstream files
//! and do not agree on column naming (`latitude` vs `lat` vs `y` vs the
//! Korean `위도`, and so on). Rather than hard-coding a projection per
//! table, each table's geometry, identifier, and display-name columns
//! are resolved once at startup from its introspected column list, and
//! the resulting [`TableSchema`] drives all query construction.

use crate::domain::kind::ShelterKind;

/// Latitude column synonyms, in priority order.
const LAT_CANDIDATES: [&str; 4] = ["latitude", "lat", "y", "위도"];

/// Longitude column synonyms, in priority order.
const LNG_CANDIDATES: [&str; 4] = ["longitude", "lng", "x", "경도"];

/// Display-name column synonyms, in priority order.
const NAME_CANDIDATES: [&str; 3] = ["name", "shelter_name", "시설명"];

/// Columns never copied into the `props` blob: every geometry alias plus
/// opaque spatial payloads. Geometry is promoted to top-level fields and
/// must not be duplicated.
const GEO_EXCLUDE: [&str; 11] = [
    "latitude", "longitude", "lat", "lng", "x", "y", "위도", "경도", "location", "geom", "shape",
];

/// Resolved column roles for one shelter table.
///
/// `extra_cols` preserves the table's native column order so the props
/// projection is reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Table name this schema was resolved from.
    pub table: &'static str,
    /// Column playing the latitude role.
    pub lat_col: String,
    /// Column playing the longitude role.
    pub lng_col: String,
    /// Native integer identifier column, when the table has one.
    pub id_col: Option<String>,
    /// Display-name column, when the table has one.
    pub name_col: Option<String>,
    /// Remaining columns destined for the `props` blob, native order.
    pub extra_cols: Vec<String>,
}

/// Raised when a table's geometry columns cannot be discovered.
///
/// This must propagate rather than default: a table with unresolvable
/// geometry would corrupt distance ranking for every mixed-kind search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("table {table} has no recognisable {role} column (columns: {columns:?})")]
pub struct SchemaError {
    /// Table whose resolution failed.
    pub table: String,
    /// Which role could not be resolved (`latitude` or `longitude`).
    pub role: &'static str,
    /// The column names that were considered.
    pub columns: Vec<String>,
}

fn find_ci<'a>(columns: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    candidates.iter().find_map(|cand| {
        columns
            .iter()
            .find(|col| col.eq_ignore_ascii_case(cand))
            .map(String::as_str)
    })
}

impl TableSchema {
    /// Resolve column roles from a table's column list (native order).
    ///
    /// Fails with [`SchemaError`] if either geometry column is missing.
    /// Identifier and display name are optional: a missing id means the
    /// search projection falls back to the synthetic hash id.
    pub fn resolve(kind: ShelterKind, columns: &[String]) -> Result<Self, SchemaError> {
        let table = kind.table();
        let lat_col = find_ci(columns, &LAT_CANDIDATES)
            .ok_or_else(|| SchemaError {
                table: table.to_owned(),
                role: "latitude",
                columns: columns.to_vec(),
            })?
            .to_owned();
        let lng_col = find_ci(columns, &LNG_CANDIDATES)
            .ok_or_else(|| SchemaError {
                table: table.to_owned(),
                role: "longitude",
                columns: columns.to_vec(),
            })?
            .to_owned();

        let id_col = columns
            .iter()
            .find(|col| col.eq_ignore_ascii_case("id"))
            .cloned();
        let name_col = find_ci(columns, &NAME_CANDIDATES).map(str::to_owned);

        let extra_cols = columns
            .iter()
            .filter(|col| {
                !GEO_EXCLUDE
                    .iter()
                    .any(|ex| col.eq_ignore_ascii_case(ex))
            })
            .cloned()
            .collect();

        Ok(Self {
            table,
            lat_col,
            lng_col,
            id_col,
            name_col,
            extra_cols,
        })
    }

    /// Whether rows of this table carry a native integer identifier.
    ///
    /// Kinds without one are searchable (with synthetic ids) but cannot
    /// be targeted by keyed lookups such as detail or favorites.
    pub fn has_native_id(&self) -> bool {
        self.id_col.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn resolves_standard_english_columns() {
        let schema = TableSchema::resolve(
            ShelterKind::Heat,
            &cols(&["id", "shelter_name", "latitude", "longitude", "capacity"]),
        )
        .expect("resolvable schema");
        assert_eq!(schema.lat_col, "latitude");
        assert_eq!(schema.lng_col, "longitude");
        assert_eq!(schema.id_col.as_deref(), Some("id"));
        assert_eq!(schema.name_col.as_deref(), Some("shelter_name"));
    }

    #[test]
    fn resolves_korean_geometry_columns() {
        let schema = TableSchema::resolve(
            ShelterKind::FineDust,
            &cols(&["시설명", "위도", "경도", "주소"]),
        )
        .expect("resolvable schema");
        assert_eq!(schema.lat_col, "위도");
        assert_eq!(schema.lng_col, "경도");
        assert_eq!(schema.name_col.as_deref(), Some("시설명"));
        assert!(schema.id_col.is_none());
    }

    #[test]
    fn synonym_priority_prefers_latitude_over_y() {
        let schema = TableSchema::resolve(
            ShelterKind::Smart,
            &cols(&["y", "x", "latitude", "longitude"]),
        )
        .expect("resolvable schema");
        assert_eq!(schema.lat_col, "latitude");
        assert_eq!(schema.lng_col, "longitude");
    }

    #[test]
    fn resolution_is_case_insensitive() {
        let schema =
            TableSchema::resolve(ShelterKind::Climate, &cols(&["ID", "LAT", "LNG", "Name"]))
                .expect("resolvable schema");
        assert_eq!(schema.lat_col, "LAT");
        assert_eq!(schema.lng_col, "LNG");
        assert_eq!(schema.id_col.as_deref(), Some("ID"));
        assert_eq!(schema.name_col.as_deref(), Some("Name"));
    }

    #[rstest]
    #[case(&["id", "longitude", "name"], "latitude")]
    #[case(&["id", "lat", "name"], "longitude")]
    fn missing_geometry_fails_rather_than_defaults(
        #[case] columns: &[&str],
        #[case] role: &str,
    ) {
        let err = TableSchema::resolve(ShelterKind::Heat, &cols(columns))
            .expect_err("geometry must be mandatory");
        assert_eq!(err.role, role);
        assert_eq!(err.table, "shelters_heat");
    }

    #[test]
    fn extra_cols_exclude_every_geometry_alias_and_keep_order() {
        let schema = TableSchema::resolve(
            ShelterKind::Heat,
            &cols(&[
                "id", "name", "lat", "lng", "x", "y", "geom", "capacity", "address", "위도",
            ]),
        )
        .expect("resolvable schema");
        assert_eq!(schema.extra_cols, cols(&["id", "name", "capacity", "address"]));
    }
}
