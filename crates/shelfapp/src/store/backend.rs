use crate::error::Result;

/// Abstract interface for the durable slot holding the collection.
///
/// The slot is opaque text: the store hands over the whole serialized
/// collection on every write and reads it back once at startup. This trait
/// handles the "where" (file vs memory), while [`BookStore`] handles the
/// "what" (hydration, ids, mutations).
///
/// [`BookStore`]: super::book_store::BookStore
pub trait SlotBackend {
    /// Read the slot's text.
    /// Returns Ok(None) if nothing was ever written.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_slot(&self) -> Result<Option<String>>;

    /// Overwrite the slot with `text`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write_slot(&self, text: &str) -> Result<()>;

    /// Human readable location of the slot, for diagnostics.
    fn describe(&self) -> String;
}
