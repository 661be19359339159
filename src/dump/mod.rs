pub mod dump_error;
pub mod dump_file;
pub mod dump_message;
pub mod replay;
pub mod replay_error;
