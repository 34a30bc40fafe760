//! Archive extraction into the module store.

mod tar_gz;

pub use tar_gz::TarGzExtractor;
