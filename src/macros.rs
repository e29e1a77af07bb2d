/// Implements [`Treeable::tree_state`](crate::Treeable::tree_state) and
/// [`Treeable::tree_state_mut`](crate::Treeable::tree_state_mut) for a type
/// embedding a [`TreeState`](crate::TreeState) in the named field.
///
/// Use it inside the `impl Treeable for ...` block:
///
/// ```
/// use treeable::{treeable_state, TreeId, TreeState, Treeable};
///
/// struct Category {
///     name: String,
///     parent: Option<String>,
///     tree: TreeState<Category>,
/// }
///
/// impl Treeable for Category {
///     fn tree_id(&self) -> TreeId {
///         TreeId::from(&self.name)
///     }
///
///     fn tree_parent(&self) -> Option<TreeId> {
///         self.parent.as_ref().map(TreeId::from)
///     }
///
///     treeable_state!(tree);
/// }
/// ```
#[macro_export]
macro_rules! treeable_state {
    ($field:ident) => {
        fn tree_state(&self) -> &$crate::TreeState<Self> {
            &self.$field
        }

        fn tree_state_mut(&mut self) -> &mut $crate::TreeState<Self> {
            &mut self.$field
        }
    };
}
