//! Two-way bindings.
//!
//! A [`Binding<T>`] pairs a getter with a setter over some value that lives
//! elsewhere: a field of a parent's state, a shared cell, or a constant. UI
//! controls take a binding so they can both display and change a value
//! without owning it.
//!
//! # Invariants
//!
//! 1. `get()` always evaluates the getter; bindings never cache.
//! 2. Clones share the same getter and setter.
//! 3. Derived bindings (such as [`Binding::has_value`]) read and write
//!    through their source binding.
//!
//! ```
//! use relay_store_core::Binding;
//!
//! let ringtone = Binding::variable(Some("chime".to_string()));
//! let enabled = ringtone.has_value();
//!
//! assert!(enabled.get());
//! enabled.set(false);
//! assert_eq!(ringtone.get(), None);
//! assert!(!enabled.get());
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

type Getter<T> = Arc<dyn Fn() -> T + Send + Sync>;
type Setter<T> = Arc<dyn Fn(T) + Send + Sync>;
type Updater<T> = Arc<dyn Fn(&mut dyn FnMut(T) -> T) + Send + Sync>;

/// A two-way accessor over a value stored elsewhere
pub struct Binding<T> {
    get: Getter<T>,
    set: Setter<T>,
    update: Option<Updater<T>>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
            set: Arc::clone(&self.set),
            update: self.update.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.get())
            .finish()
    }
}

impl<T> Binding<T> {
    /// Create a binding from a getter and a setter
    pub fn new<G, S>(get: G, set: S) -> Self
    where
        G: Fn() -> T + Send + Sync + 'static,
        S: Fn(T) + Send + Sync + 'static,
    {
        Self {
            get: Arc::new(get),
            set: Arc::new(set),
            update: None,
        }
    }

    /// Read the current value
    #[must_use]
    pub fn get(&self) -> T {
        (self.get)()
    }

    /// Write a new value through the setter
    pub fn set(&self, value: T) {
        (self.set)(value);
    }

    /// Read, transform and write back
    ///
    /// On a [`Binding::variable`] (and its clones) this holds the cell's write
    /// lock across `f`, so concurrent updates never lose a write; `f` must not
    /// touch the same binding. Any other binding reads and then writes in two
    /// separate steps, which is not atomic.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        match &self.update {
            Some(updater) => {
                let mut f = Some(f);
                updater(&mut |value| match f.take() {
                    Some(f) => f(value),
                    None => value,
                });
            },
            None => self.set(f(self.get())),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Binding<T> {
    /// A binding that always reads `value` and ignores writes
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self::new(move || value.clone(), |_| {})
    }

    /// A binding backed by its own shared cell, starting at `value`
    ///
    /// Useful for previews and tests; all clones see the same cell.
    #[must_use]
    pub fn variable(value: T) -> Self {
        let cell = Arc::new(RwLock::new(value));
        let reader = Arc::clone(&cell);
        let writer = Arc::clone(&cell);

        let mut binding = Self::new(
            move || reader.read().unwrap_or_else(PoisonError::into_inner).clone(),
            move |value| *writer.write().unwrap_or_else(PoisonError::into_inner) = value,
        );
        binding.update = Some(Arc::new(move |f: &mut dyn FnMut(T) -> T| {
            let mut guard = cell.write().unwrap_or_else(PoisonError::into_inner);
            let next = f(guard.clone());
            *guard = next;
        }));
        binding
    }
}

impl<T: 'static> Binding<Option<T>> {
    /// Presence flag over an optional value
    ///
    /// - reads `true` when the source holds `Some`
    /// - writing `false` clears the source to `None`
    /// - writing `true` does nothing, since there is no value to put back
    #[must_use]
    pub fn has_value(&self) -> Binding<bool> {
        let source = self.clone();
        let sink = self.clone();

        Binding::new(
            move || source.get().is_some(),
            move |present| {
                if present {
                    tracing::trace!("Ignoring `true` written to a presence binding");
                } else {
                    sink.set(None);
                }
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn has_value_reads_presence() {
        let present = Binding::variable(Some(3_u8));
        let absent = Binding::<Option<u8>>::variable(None);

        assert!(present.has_value().get());
        assert!(!absent.has_value().get());
    }

    #[test]
    fn writing_false_clears_the_source() {
        let source = Binding::variable(Some("alarm".to_string()));
        let flag = source.has_value();

        flag.set(false);

        assert_eq!(source.get(), None);
        assert!(!flag.get());
    }

    #[test]
    fn writing_true_is_a_no_op() {
        let source = Binding::<Option<u32>>::variable(None);
        source.has_value().set(true);
        assert_eq!(source.get(), None);

        let source = Binding::variable(Some(5_u32));
        source.has_value().set(true);
        assert_eq!(source.get(), Some(5));
    }

    #[test]
    fn has_value_tracks_later_source_changes() {
        let source = Binding::<Option<u32>>::variable(None);
        let flag = source.has_value();

        source.set(Some(1));
        assert!(flag.get());
    }

    #[test]
    fn constant_ignores_writes() {
        let binding = Binding::constant(Some(1_i32));
        binding.has_value().set(false);
        binding.set(None);
        assert_eq!(binding.get(), Some(1));
    }

    #[test]
    fn concurrent_updates_on_a_variable_keep_every_write() {
        let total = Binding::variable(0_usize);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let total = total.clone();
                scope.spawn(move || {
                    for _ in 0..1_000 {
                        total.update(|n| n + 1);
                    }
                });
            }
        });

        assert_eq!(total.get(), 8_000);
    }

    #[test]
    fn update_on_a_custom_binding_reads_then_writes() {
        let cell = Binding::variable(vec![1_u8]);
        let (reader, writer) = (cell.clone(), cell.clone());
        let custom = Binding::new(move || reader.get(), move |value| writer.set(value));

        custom.update(|mut values| {
            values.push(2);
            values
        });

        assert_eq!(cell.get(), vec![1, 2]);
    }

    #[test]
    fn custom_setters_see_every_write() {
        let writes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&writes);
        let binding = Binding::new(|| Some(0_u8), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let flag = binding.has_value();
        flag.set(true);
        flag.set(false);
        binding.update(|value| value.map(|v| v + 1));

        assert_eq!(writes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn debug_shows_current_value() {
        let binding = Binding::variable(7_u16);
        assert_eq!(format!("{binding:?}"), "Binding { value: 7 }");
    }
}
