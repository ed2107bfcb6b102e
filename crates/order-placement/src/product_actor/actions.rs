//! Custom actions for the Product store.

/// Stock operations on a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the current stock level.
    CheckStock,
    /// Sets stock to `new_quantity` if it still equals `expected`.
    ///
    /// # Errors
    /// [`StockConflict`](super::ProductError::StockConflict) when the level
    /// moved since `expected` was read, and
    /// [`InvalidAdjustment`](super::ProductError::InvalidAdjustment) when
    /// `new_quantity` would raise stock.
    AdjustStock { expected: u32, new_quantity: u32 },
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductActionResult {
    /// Current stock level
    CheckStock(u32),
    /// Stock level after the adjustment
    AdjustStock(u32),
}
