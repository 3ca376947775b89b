mod format;
mod reader;

pub use format::{
    read_sized_string, read_u32, DirectoryRecord, PackageDirectory, PackageHeader,
    HEADER_STRING_LENGTH, MAGIC_PREFIX, MIN_RECORD_SIZE,
};
pub use reader::{ArchiveContainer, LoadStrategy};
