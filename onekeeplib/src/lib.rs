//! onekeeplib: конвертация экспорта 1Password (TSV) в XML для импорта в KeePassX

pub mod convert;
pub mod error;
pub mod mapper;
pub mod model;
pub mod profile;
pub mod traits;
pub mod transform;

pub mod formats {
    pub mod keepassx;
    pub mod onepassword;
}

pub use convert::{convert, convert_file, output_path};
pub use error::{ConvertError, Result};
pub use mapper::{resolve, resolve_profile};
pub use profile::Language;
pub use transform::transform;
