//! Diesel schema for task persistence.

diesel::table! {
    /// Task records in collection order.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Zero-based position in the collection.
        position -> Int8,
        /// Trimmed task title.
        #[max_length = 100]
        title -> Varchar,
        /// Optional rich-text description.
        description -> Nullable<Text>,
        /// Optional calendar due date.
        due_date -> Nullable<Date>,
        /// Urgent flag.
        urgent -> Bool,
        /// Important flag.
        important -> Bool,
        /// Quadrant name.
        #[max_length = 20]
        quadrant -> Varchar,
        /// Completion state.
        completed -> Bool,
        /// Completion timestamp.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
