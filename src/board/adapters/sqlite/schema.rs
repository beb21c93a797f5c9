//! Diesel schema for board persistence.

diesel::table! {
    /// Board records.
    #[sql_name = "Boards"]
    boards (id) {
        /// Board identifier.
        #[sql_name = "Id"]
        id -> BigInt,
        /// Board name.
        #[sql_name = "Name"]
        name -> Text,
        /// Current owner.
        #[sql_name = "OwnerEmail"]
        owner_email -> Text,
    }
}

diesel::table! {
    /// Board membership records.
    #[sql_name = "BoardMembers"]
    board_members (board_id, email) {
        /// Owning board.
        #[sql_name = "BoardID"]
        board_id -> BigInt,
        /// Member email.
        #[sql_name = "Email"]
        email -> Text,
    }
}

diesel::table! {
    /// Column records, three per board.
    #[sql_name = "Columns"]
    columns (board_id, ordinal) {
        /// Owning board.
        #[sql_name = "BoardID"]
        board_id -> BigInt,
        /// Column ordinal (0 backlog, 1 in progress, 2 done).
        #[sql_name = "Ordinal"]
        ordinal -> BigInt,
        /// WIP limit, `-1` for unbounded.
        #[sql_name = "TasksLimit"]
        tasks_limit -> BigInt,
    }
}

diesel::table! {
    /// Task records.
    #[sql_name = "Tasks"]
    tasks (board_id, ordinal, task_id) {
        /// Owning board.
        #[sql_name = "BoardID"]
        board_id -> BigInt,
        /// Column holding the task.
        #[sql_name = "Ordinal"]
        ordinal -> BigInt,
        /// Task identifier.
        #[sql_name = "TaskId"]
        task_id -> BigInt,
        /// Assignee email, empty when unassigned.
        #[sql_name = "AssigneeEmail"]
        assignee_email -> Text,
        /// Task title.
        #[sql_name = "Title"]
        title -> Text,
        /// Task description.
        #[sql_name = "Description"]
        description -> Text,
        /// Due date as RFC 3339 text.
        #[sql_name = "DueDate"]
        due_date -> Text,
        /// Creation timestamp as RFC 3339 text.
        #[sql_name = "CreationTime"]
        creation_time -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(boards, board_members, columns, tasks);
