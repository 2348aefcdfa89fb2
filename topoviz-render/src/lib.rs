pub mod canvas;
pub mod error;
pub mod label;
pub mod layout;
pub mod options;
pub mod output;
pub mod viewer;

pub use canvas::Renderer;
pub use error::RenderError;
pub use layout::Layout;
pub use options::{LayoutKind, RenderOptions};
pub use output::{export_snapshot, save_png};
pub use viewer::show_image;
