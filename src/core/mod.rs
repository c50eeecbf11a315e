//! Pure variant-sync logic: summary formatting, change detection, and
//! description patching. No I/O happens here; every function takes value
//! inputs and returns value outputs, so calls for different products can
//! run concurrently without coordination.

pub mod comparator;
pub mod formatter;
pub mod patcher;
