pub mod generate;
pub mod patch;

pub use generate::Generate;
pub use patch::{apply_patch, PatchError, PatchOperation};
