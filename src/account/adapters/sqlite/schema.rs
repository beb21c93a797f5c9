//! Diesel schema for account persistence.

diesel::table! {
    /// Registered users.
    #[sql_name = "Users"]
    users (email) {
        /// Normalised email, primary key.
        #[sql_name = "Email"]
        email -> Text,
        /// Account password.
        #[sql_name = "Password"]
        password -> Text,
    }
}
