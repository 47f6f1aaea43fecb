//! Dynamic SQL construction for the heterogeneous shelter tables.
//!
//! The four shelter tables share no schema, so their queries cannot be
//! written with static Diesel DSL. Instead, each statement is rendered
//! from a [`TableSchema`] resolved at startup:
//!
//! - every identifier that appears in SQL comes from
//!   `information_schema` introspection of a whitelisted table, never
//!   from request input, and is double-quoted here;
//! - numeric search parameters are validated by [`NearbyQuery`] before
//!   they are rendered as literals;
//! - shelter ids in keyed lookups are passed as bind parameters.
//!
//! The nearby search renders one SELECT per kind, all projecting the
//! same seven columns, and glues them with `UNION ALL` so ordering and
//! the limit apply to the combined set in a single round trip.

use crate::domain::geo::BoundingBox;
use crate::domain::kind::ShelterKind;
use crate::domain::schema::TableSchema;
use crate::domain::shelter::NearbyQuery;

/// Quote an SQL identifier, doubling embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal, doubling embedded quotes.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render an f64 as an SQL literal. `{:?}` gives the shortest decimal
/// that round-trips; PostgreSQL accepts both plain and exponent forms.
fn fmt_f64(value: f64) -> String {
    format!("{value:?}")
}

/// Numeric cast of a geometry column; source columns are sometimes
/// ingested as text.
fn float_col(col: &str) -> String {
    format!("({})::float8", quote_ident(col))
}

/// Haversine great-circle distance (metres) between each row's point
/// and the search origin. `least(1.0, ...)` guards `asin` against
/// floating-point overshoot on antipodal inputs.
fn distance_expr(schema: &TableSchema, origin_lat: f64, origin_lng: f64) -> String {
    let lat = float_col(&schema.lat_col);
    let lng = float_col(&schema.lng_col);
    let olat = fmt_f64(origin_lat);
    let olng = fmt_f64(origin_lng);
    format!(
        "2.0 * 6371000.0 * asin(least(1.0, sqrt(\
         power(sin(radians({lat} - {olat}) / 2.0), 2) \
         + cos(radians({olat})) * cos(radians({lat})) \
         * power(sin(radians({lng} - {olng}) / 2.0), 2))))"
    )
}

/// Uniform `id` column: native id cast to text, or the deterministic
/// md5 hash of kind and coordinates when the table has none.
fn id_expr(schema: &TableSchema, kind: ShelterKind) -> String {
    match &schema.id_col {
        Some(id_col) => format!("({})::text", quote_ident(id_col)),
        None => format!(
            "md5(concat_ws(':', {}, ({})::text, ({})::text))",
            quote_literal(kind.as_str()),
            quote_ident(&schema.lng_col),
            quote_ident(&schema.lat_col),
        ),
    }
}

/// Uniform `name` column, or a typed NULL when the table has none.
fn name_expr(schema: &TableSchema) -> String {
    match &schema.name_col {
        Some(name_col) => format!("({})::text", quote_ident(name_col)),
        None => "NULL::text".to_owned(),
    }
}

/// Catch-all `props` object over the non-geometry columns, preserving
/// the table's native column order, or a typed NULL when empty.
fn props_expr(schema: &TableSchema) -> String {
    if schema.extra_cols.is_empty() {
        return "NULL::json".to_owned();
    }
    let pairs: Vec<String> = schema
        .extra_cols
        .iter()
        .map(|col| format!("{}, {}", quote_literal(col), quote_ident(col)))
        .collect();
    format!("json_build_object({})", pairs.join(", "))
}

/// Render the per-kind SELECT of the nearby search.
///
/// The bbox predicate is a cheap, deliberately loose pre-filter that
/// lets the database range-scan before computing distances; the
/// distance predicate is the authoritative radius check.
fn kind_select(
    schema: &TableSchema,
    kind: ShelterKind,
    query: &NearbyQuery,
    bbox: &BoundingBox,
) -> String {
    let lat = float_col(&schema.lat_col);
    let lng = float_col(&schema.lng_col);
    let distance = distance_expr(schema, query.lat, query.lng);
    format!(
        "SELECT {id} AS id, {kind}::text AS kind, {lat} AS latitude, {lng} AS longitude, \
         {distance} AS distance_m, {name} AS name, {props} AS props \
         FROM {table} \
         WHERE {lat} BETWEEN {min_lat} AND {max_lat} \
         AND {lng} BETWEEN {min_lng} AND {max_lng} \
         AND {distance} <= {radius}",
        id = id_expr(schema, kind),
        kind = quote_literal(kind.as_str()),
        name = name_expr(schema),
        props = props_expr(schema),
        table = quote_ident(schema.table),
        min_lat = fmt_f64(bbox.min_lat),
        max_lat = fmt_f64(bbox.max_lat),
        min_lng = fmt_f64(bbox.min_lng),
        max_lng = fmt_f64(bbox.max_lng),
        radius = fmt_f64(query.radius_m),
    )
}

/// Render the combined nearby-search statement over the query's kinds.
///
/// Returns `None` when the kind set is empty so callers can skip the
/// round trip entirely. Ordering is ascending distance with a
/// deterministic tie-break on kind then id.
pub fn nearby_union(schemas: &[(ShelterKind, &TableSchema)], query: &NearbyQuery) -> Option<String> {
    if schemas.is_empty() {
        return None;
    }
    let bbox = BoundingBox::around(query.lat, query.lng, query.radius_m);
    let selects: Vec<String> = schemas
        .iter()
        .map(|(kind, schema)| kind_select(schema, *kind, query, &bbox))
        .collect();
    Some(format!(
        "SELECT u.id, u.kind, u.latitude, u.longitude, u.distance_m, u.name, u.props \
         FROM ({union}) AS u \
         ORDER BY u.distance_m ASC, u.kind ASC, u.id ASC \
         LIMIT {limit}",
        union = selects.join(" UNION ALL "),
        limit = query.limit,
    ))
}

/// Render the detail statement: the full native row as JSON, keyed by
/// the native id (`$1`). `None` when the table has no id column.
pub fn detail_select(schema: &TableSchema) -> Option<String> {
    let id_col = schema.id_col.as_deref()?;
    Some(format!(
        "SELECT row_to_json(t) AS detail FROM {table} AS t WHERE ({id})::bigint = $1",
        table = quote_ident(schema.table),
        id = quote_ident(id_col),
    ))
}

/// Render the keyed existence check (`$1` = shelter id). `None` when
/// the table has no id column.
pub fn exists_select(schema: &TableSchema) -> Option<String> {
    let id_col = schema.id_col.as_deref()?;
    Some(format!(
        "SELECT 1 AS present FROM {table} WHERE ({id})::bigint = $1 LIMIT 1",
        table = quote_ident(schema.table),
        id = quote_ident(id_col),
    ))
}

/// Render the batched summary lookup (`$1` = id array) used by the
/// favorites listing: one statement per distinct kind on the page, not
/// one per favorite. `None` when the table has no id column.
pub fn summaries_select(schema: &TableSchema, kind: ShelterKind) -> Option<String> {
    let id_col = schema.id_col.as_deref()?;
    let lat = float_col(&schema.lat_col);
    let lng = float_col(&schema.lng_col);
    Some(format!(
        "SELECT ({id})::bigint AS native_id, ({id})::text AS id, {kind}::text AS kind, \
         {lat} AS latitude, {lng} AS longitude, {name} AS name, {props} AS props \
         FROM {table} WHERE ({id})::bigint = ANY($1)",
        id = quote_ident(id_col),
        kind = quote_literal(kind.as_str()),
        name = name_expr(schema),
        props = props_expr(schema),
        table = quote_ident(schema.table),
    ))
}
