//! Diesel schema for task document storage.

diesel::table! {
    /// Task documents, one row per card.
    tasks (id) {
        /// Store-assigned identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional free-text message.
        message -> Nullable<Text>,
        /// Optional due timestamp.
        date -> Nullable<Timestamptz>,
        /// Status string.
        #[max_length = 50]
        status -> Varchar,
        /// Optional priority string.
        #[max_length = 50]
        priority -> Nullable<Varchar>,
        /// Insertion timestamp used for listing order.
        created_at -> Timestamptz,
    }
}
