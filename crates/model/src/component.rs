// ABOUTME: Identity and refresh-merge behavior shared by feeds, items and media.
// ABOUTME: Equality and hashing compare the persisted id only, via one shared macro.

/// Common behavior of every persisted part of a feed.
///
/// `update_from_other` and `compare_with_other` only consider attributes that
/// are read from the feed document. Attributes owned by the user (play state,
/// queue membership, playback position, preferences) are never touched, so a
/// refresh can not clobber them.
pub trait FeedComponent {
    /// Identity assigned by persistence. Freshly parsed components carry 0.
    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Non-empty label for the user, e.g. the title or the download URL.
    fn human_readable_identifier(&self) -> String;

    /// Copies feed-supplied attributes from a freshly parsed component.
    fn update_from_other(&mut self, other: &Self)
    where
        Self: Sized;

    /// Returns true when any feed-supplied attribute differs from `other`.
    fn compare_with_other(&self, other: &Self) -> bool
    where
        Self: Sized;
}

/// Implements `PartialEq`, `Eq` and `Hash` on the `id` field only.
macro_rules! impl_identity_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    self.id.hash(state);
                }
            }
        )+
    };
}

pub(crate) use impl_identity_eq;

/// Assigns `other` to `target` when `other` carries a value.
pub(crate) fn update_if_present<T: Clone>(target: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        target.clone_from(other);
    }
}

/// True when `other` carries a value that differs from `current`.
pub(crate) fn differs_if_present<T: PartialEq>(current: &Option<T>, other: &Option<T>) -> bool {
    other.is_some() && current != other
}
