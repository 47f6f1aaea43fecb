//! Diesel table definitions for the tables this service owns.
//!
//! Only `users`, `favorites`, and `shelter_reviews` are owned here and
//! get static definitions. The four shelter tables are populated by
//! external ingestion with divergent schemas; they are deliberately
//! absent and reached through runtime-resolved SQL instead (see
//! `nearby_sql`).

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key.
        id -> Int4,
        /// Unique login email.
        email -> Varchar,
        /// Argon2id password hash.
        password_hash -> Varchar,
        /// Age in years.
        age -> Int4,
        /// Health-type code (1..=9).
        health_type -> Int4,
        /// Account creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Favorites ledger; unique on (user_id, shelter_type, shelter_id).
    favorites (id) {
        /// Primary key.
        id -> Int4,
        /// Owning user.
        user_id -> Int4,
        /// Shelter kind tag (wire name of the kind).
        shelter_type -> Varchar,
        /// Shelter id within the kind's table.
        shelter_id -> Int8,
        /// When the favorite was recorded.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only shelter reviews.
    shelter_reviews (id) {
        /// Primary key.
        id -> Int8,
        /// Author.
        user_id -> Int4,
        /// Target shelter id within its kind's table.
        shelter_id -> Int8,
        /// Target shelter kind tag.
        shelter_type -> Varchar,
        /// Star rating, a validated tenth in [0.0, 5.0].
        rating -> Float8,
        /// Free-text body.
        review_text -> Nullable<Text>,
        /// Author-chosen display name.
        review_name -> Nullable<Varchar>,
        /// Crowding label (여유/보통/혼잡).
        comfort -> Nullable<Varchar>,
        /// Accessibility label (상/중/하).
        accessibility_rating -> Nullable<Varchar>,
        /// HVAC label (on/off).
        heating_cooling_status -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, favorites, shelter_reviews);
