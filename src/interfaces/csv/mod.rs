pub mod notification_reader;
pub mod outcome_writer;
