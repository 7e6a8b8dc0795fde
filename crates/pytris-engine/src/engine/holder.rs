use crate::{HolderClosedError, PieceKind};

/// A single-slot store that can be closed against writes.
///
/// Reading is never gated: [`Holder::get_item`] returns whatever is held even while
/// the holder is closed. Opening and closing never touch the held item.
///
/// # Example
///
/// ```
/// use pytris_engine::Holder;
///
/// let mut holder = Holder::new();
/// assert!(holder.is_open());
/// holder.store(1)?;
/// assert_eq!(holder.get_item(), Some(&1));
///
/// holder.close();
/// assert!(holder.store(2).is_err());
/// assert_eq!(holder.get_item(), Some(&1));
///
/// holder.open();
/// holder.store(2)?;
/// assert_eq!(holder.get_item(), Some(&2));
/// # Ok::<(), pytris_engine::HolderClosedError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holder<T = PieceKind> {
    item: Option<T>,
    can_store: bool,
}

impl<T> Default for Holder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Holder<T> {
    /// Creates an open, empty holder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            item: None,
            can_store: true,
        }
    }

    /// Holds `item`, replacing anything already held.
    ///
    /// Fails without side effects while the holder is closed.
    pub fn store(&mut self, item: T) -> Result<(), HolderClosedError> {
        if !self.can_store {
            return Err(HolderClosedError);
        }
        self.item = Some(item);
        Ok(())
    }

    pub fn open(&mut self) {
        self.can_store = true;
    }

    pub fn close(&mut self) {
        self.can_store = false;
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.can_store
    }

    #[must_use]
    pub fn get_item(&self) -> Option<&T> {
        self.item.as_ref()
    }
}
