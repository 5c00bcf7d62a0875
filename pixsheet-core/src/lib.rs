pub mod error;
pub mod format;
pub mod encode;
pub mod decode;

pub use error::SheetError;
