/// Identifier for a branch slot in a [`crate::tree::Tree`].
///
/// This is an index into `Tree::branches`, and is only meaningful within
/// the lifetime of a given `Tree` instance. Slots are handed out in append
/// order, so a branch's slot doubles as its activation-order key.
pub type Slot = usize;
