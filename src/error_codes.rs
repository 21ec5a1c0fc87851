//! Error code constants
//!
//! Front ends translate these codes instead of matching on message text.

/// Compare root is missing or not a directory
pub const ERR_NOT_A_DIRECTORY: &str = "ERR_NOT_A_DIRECTORY";

/// Directory comparison failed
pub const ERR_COMPARE_FAILED: &str = "ERR_COMPARE_FAILED";

/// Writing a merged file failed
pub const ERR_WRITE_FAILED: &str = "ERR_WRITE_FAILED";

/// Relative path rejected before writing
pub const ERR_INVALID_PATH: &str = "ERR_INVALID_PATH";

/// Config could not be read, parsed or written
pub const ERR_CONFIG_FAILED: &str = "ERR_CONFIG_FAILED";

/// Unclassified I/O failure
pub const ERR_IO: &str = "ERR_IO";
