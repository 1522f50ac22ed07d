//! Case paths: partial, invertible projections into enum variants.
//!
//! A [`CasePath<Root, Value>`] pairs two functions:
//!
//! - `extract`: `&Root -> Option<Value>`, succeeds only for one variant
//! - `embed`: `Value -> Root`, rebuilds that variant from its payload
//!
//! They are the enum counterpart of a field accessor, and let combinators such
//! as [`ReducerExt::relay_case`](crate::relay::ReducerExt::relay_case) react to a
//! single variant without knowing the whole action type.
//!
//! ```
//! use relay_store_core::CasePath;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Action {
//!     SomeAction(i32),
//!     Other,
//! }
//!
//! let some_action = CasePath::new(Action::SomeAction, |action: &Action| match action {
//!     Action::SomeAction(value) => Some(*value),
//!     _ => None,
//! });
//!
//! assert_eq!(some_action.extract(&Action::SomeAction(42)), Some(42));
//! assert_eq!(some_action.extract(&Action::Other), None);
//! assert_eq!(some_action.embed(7), Action::SomeAction(7));
//! ```
//!
//! `#[derive(CasePaths)]` from `relay-store-macros` generates these for every
//! variant of an enum.

use std::fmt;
use std::sync::Arc;

type Extract<Root, Value> = Arc<dyn Fn(&Root) -> Option<Value> + Send + Sync>;
type Embed<Root, Value> = Arc<dyn Fn(Value) -> Root + Send + Sync>;

/// A partial projection from `Root` to one variant's `Value`
pub struct CasePath<Root, Value> {
    extract: Extract<Root, Value>,
    embed: Embed<Root, Value>,
}

impl<Root, Value> CasePath<Root, Value> {
    /// Build a case path from its embed and extract functions
    ///
    /// `extract(&embed(value))` must return `Some(value)`.
    pub fn new<EmbedFn, ExtractFn>(embed: EmbedFn, extract: ExtractFn) -> Self
    where
        EmbedFn: Fn(Value) -> Root + Send + Sync + 'static,
        ExtractFn: Fn(&Root) -> Option<Value> + Send + Sync + 'static,
    {
        Self {
            extract: Arc::new(extract),
            embed: Arc::new(embed),
        }
    }

    /// Try to view `root` as this path's variant
    #[must_use]
    pub fn extract(&self, root: &Root) -> Option<Value> {
        (self.extract)(root)
    }

    /// Rebuild the root value from a payload
    #[must_use]
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }

    /// Returns true if `root` is this path's variant
    #[must_use]
    pub fn matches(&self, root: &Root) -> bool {
        self.extract(root).is_some()
    }

    /// Focus further into the payload with another case path
    ///
    /// Useful for nested actions such as `Parent::Child(Child::Saved(id))`.
    #[must_use]
    pub fn appending<Leaf>(&self, inner: CasePath<Value, Leaf>) -> CasePath<Root, Leaf>
    where
        Root: 'static,
        Value: 'static,
        Leaf: 'static,
    {
        let outer_extract = Arc::clone(&self.extract);
        let outer_embed = Arc::clone(&self.embed);
        let inner_extract = Arc::clone(&inner.extract);
        let inner_embed = inner.embed;

        CasePath {
            extract: Arc::new(move |root: &Root| {
                outer_extract(root).and_then(|value| inner_extract(&value))
            }),
            embed: Arc::new(move |leaf: Leaf| outer_embed(inner_embed(leaf))),
        }
    }
}

impl<Root: Clone + 'static> CasePath<Root, Root> {
    /// The path that matches every value and extracts it unchanged
    #[must_use]
    pub fn identity() -> Self {
        Self::new(|root| root, |root: &Root| Some(root.clone()))
    }
}

impl<Root, Value> Clone for CasePath<Root, Value> {
    fn clone(&self) -> Self {
        Self {
            extract: Arc::clone(&self.extract),
            embed: Arc::clone(&self.embed),
        }
    }
}

impl<Root, Value> fmt::Debug for CasePath<Root, Value> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CasePath")
            .field("root", &std::any::type_name::<Root>())
            .field("value", &std::any::type_name::<Value>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum ChildAction {
        Saved(u32),
        Cancelled,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ParentAction {
        Child(ChildAction),
        Refresh,
    }

    fn child() -> CasePath<ParentAction, ChildAction> {
        CasePath::new(ParentAction::Child, |action: &ParentAction| match action {
            ParentAction::Child(child) => Some(child.clone()),
            ParentAction::Refresh => None,
        })
    }

    fn saved() -> CasePath<ChildAction, u32> {
        CasePath::new(ChildAction::Saved, |action: &ChildAction| match action {
            ChildAction::Saved(id) => Some(*id),
            ChildAction::Cancelled => None,
        })
    }

    #[test]
    fn extract_matches_only_its_variant() {
        let path = child();
        assert_eq!(
            path.extract(&ParentAction::Child(ChildAction::Cancelled)),
            Some(ChildAction::Cancelled)
        );
        assert_eq!(path.extract(&ParentAction::Refresh), None);
        assert!(!path.matches(&ParentAction::Refresh));
    }

    #[test]
    fn appending_reaches_nested_payloads() {
        let path = child().appending(saved());

        assert_eq!(
            path.extract(&ParentAction::Child(ChildAction::Saved(9))),
            Some(9)
        );
        assert_eq!(
            path.extract(&ParentAction::Child(ChildAction::Cancelled)),
            None
        );
        assert_eq!(path.extract(&ParentAction::Refresh), None);
        assert_eq!(path.embed(3), ParentAction::Child(ChildAction::Saved(3)));
    }

    #[test]
    fn identity_extracts_everything() {
        let path = CasePath::<ParentAction, ParentAction>::identity();
        assert_eq!(
            path.extract(&ParentAction::Refresh),
            Some(ParentAction::Refresh)
        );
        assert_eq!(path.embed(ParentAction::Refresh), ParentAction::Refresh);
    }

    #[test]
    fn debug_names_the_types() {
        let rendered = format!("{:?}", saved());
        assert!(rendered.contains("ChildAction"));
        assert!(rendered.contains("u32"));
    }
}
