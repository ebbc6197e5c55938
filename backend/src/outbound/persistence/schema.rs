//! Diesel schema definitions for the marketplace tables.
//!
//! Kept in sync with the SQL in `migrations/`; regenerate with
//! `diesel print-schema` after adding a migration.

diesel::table! {
    /// Relational user rows keyed by the identity provider's opaque id.
    users (id) {
        /// Principal identifier shared with the identity provider.
        id -> Text,
        /// Marketplace role: `freelancer` or `company`.
        user_type -> Varchar,
        /// Display name shown on profile cards.
        name -> Nullable<Varchar>,
        /// Avatar URL shown on profile cards.
        image_url -> Nullable<Varchar>,
        /// Row creation timestamp.
        created_at -> Timestamptz,
        /// Last role or profile change timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Jobs posted by company users.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning company's principal id.
        company_id -> Text,
        /// Listing title.
        title -> Varchar,
        /// Lifecycle state: `open` or `closed`.
        status -> Varchar,
        /// Posting timestamp; drives listing order.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Freelancer offers against projects.
    proposals (id) {
        /// Proposal identifier.
        id -> Uuid,
        /// Project the proposal targets.
        project_id -> Uuid,
        /// Submitting freelancer's principal id.
        user_id -> Text,
        /// Offer value in minor currency units.
        value -> Int8,
        /// Lifecycle state: `pending`, `accepted` or `rejected`.
        status -> Varchar,
        /// Submission timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (company_id));
diesel::joinable!(proposals -> projects (project_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, proposals);
