pub mod file_logger;
