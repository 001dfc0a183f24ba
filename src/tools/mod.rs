mod frame_selector;
mod image_decoder;
mod image_scanner;
mod path_validator;
mod progress;

pub use frame_selector::{calculate_runtime, select_frames};
pub use image_decoder::ImageFileDecoder;
pub use image_scanner::{IMAGE_EXTENSIONS, is_image_file, scan_image_files};
pub use path_validator::resolve_source_folder;
pub use progress::TerminalProgress;
