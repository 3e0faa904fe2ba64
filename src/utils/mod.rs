pub mod environment;
pub mod paths;
pub mod terminal;
pub mod timestamps;

pub use environment::{ARCHIVE_FILE_ENV, resolve_archive_path};
pub use paths::{
    format_file_size, format_path_with_tilde, read_archive_file, safe_open_archive,
    validate_archive_extension, validate_file_size,
};
pub use terminal::sanitize_for_terminal;
pub use timestamps::{epoch_to_datetime, format_display_date, format_full_timestamp, month_key};
