//! Diesel schema for task board persistence.

diesel::table! {
    /// Board tasks, ordered per owner and column by `position`.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning user identifier.
        owner_id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Column the task occupies.
        status -> Text,
        /// Zero-based rank within the owner's column.
        position -> Int4,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
