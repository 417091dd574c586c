#![forbid(unsafe_code)]

pub mod background;
pub mod composite;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod pool;

pub use background::BackgroundStyle;
pub use composite::{alpha_mask, composite_over};
pub use error::{SegprepError, SegprepResult};
pub use pipeline::{
    BackgroundSource, CleanSummary, ProcessOptions, RunSummary, clean_directories,
    process_directory,
};
pub use pool::BackgroundPool;
