use crate::utils::error::Result;

/// Byte-level access to wherever the fleet file lives.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;

    /// Replaces the whole file; a failed write leaves the previous content.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}
