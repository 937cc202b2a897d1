//! sea-orm entities for the accounts service database.

pub mod activity_logs;
pub mod one_time_codes;
pub mod users;
