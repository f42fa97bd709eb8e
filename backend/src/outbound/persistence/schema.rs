//! Diesel table definitions for the counter schema.
//!
//! Kept in sync with `backend/migrations` by hand.

diesel::table! {
    /// Singleton row holding the counter value; `id` is pinned to 1.
    count_table (id) {
        id -> Int4,
        count_number -> Int4,
    }
}

diesel::table! {
    /// Append-only audit trail of counter mutations.
    count_history (id) {
        id -> Int4,
        count_value -> Int4,
        action -> Varchar,
        #[sql_name = "timestamp"]
        recorded_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(count_table, count_history);
