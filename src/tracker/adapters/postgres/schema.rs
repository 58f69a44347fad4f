//! Diesel schema for tracker persistence.

diesel::table! {
    /// Seeded task statuses.
    statuses (id) {
        /// Stable status identifier.
        id -> Int2,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
    }
}

diesel::table! {
    /// Projects with their task-number high-water mark.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Owning user.
        owner_id -> Uuid,
        /// Project name, unique per owner.
        #[max_length = 255]
        name -> Varchar,
        /// Highest task number allocated so far.
        last_task_nr -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks numbered per project.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Per-project task number.
        nr -> Int4,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Status reference.
        status_id -> Int2,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project-scoped tags.
    tags (id) {
        /// Tag identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Tag name, unique per project.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task-tag links.
    tag_task (tag_id, task_id) {
        /// Linked tag.
        tag_id -> Uuid,
        /// Linked task.
        task_id -> Uuid,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(tasks -> statuses (status_id));
diesel::joinable!(tags -> projects (project_id));
diesel::joinable!(tag_task -> tags (tag_id));
diesel::joinable!(tag_task -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(projects, statuses, tasks, tags, tag_task);
