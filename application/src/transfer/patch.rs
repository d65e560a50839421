/// Presence-aware update of a single field.
///
/// Distinguishes an argument the caller left out from one it supplied, which
/// matters for nullable fields where `Set(None)` clears the stored value.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Set(T),
}
