use std::fmt;

/// Ownership strategy for one piece of table state (selection, expansion, sort, widths).
///
/// The strategy is fixed when the binding is created:
/// - `Internal`: the table owns the value and applies change requests itself.
/// - `External`: the app owns the value. Change requests go to `on_change` and the local copy
///   only moves when the app pushes a new value back with [`StateBinding::sync`].
pub enum StateBinding<T> {
    Internal(T),
    External {
        value: T,
        on_change: Box<dyn FnMut(&T)>,
    },
}

impl<T: Default> Default for StateBinding<T> {
    fn default() -> Self {
        StateBinding::Internal(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for StateBinding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateBinding::Internal(v) => f.debug_tuple("Internal").field(v).finish(),
            StateBinding::External { value, .. } => f
                .debug_struct("External")
                .field("value", value)
                .finish_non_exhaustive(),
        }
    }
}

impl<T> StateBinding<T> {
    pub fn internal(initial: T) -> Self {
        StateBinding::Internal(initial)
    }

    pub fn external(value: T, on_change: impl FnMut(&T) + 'static) -> Self {
        StateBinding::External {
            value,
            on_change: Box::new(on_change),
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, StateBinding::External { .. })
    }

    pub fn get(&self) -> &T {
        match self {
            StateBinding::Internal(v) => v,
            StateBinding::External { value, .. } => value,
        }
    }

    pub fn request(&mut self, next: T) {
        match self {
            StateBinding::Internal(v) => *v = next,
            StateBinding::External { on_change, .. } => on_change(&next),
        }
    }

    /// Replaces the current value without notifying anyone.
    pub fn sync(&mut self, value: T) {
        match self {
            StateBinding::Internal(v) => *v = value,
            StateBinding::External { value: v, .. } => *v = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn internal_binding_applies_requests() {
        let mut b = StateBinding::internal(1);
        b.request(2);
        assert_eq!(*b.get(), 2);
        assert!(!b.is_controlled());
    }

    #[test]
    fn external_binding_forwards_and_keeps_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut b = StateBinding::external(1, move |v: &i32| sink.borrow_mut().push(*v));
        b.request(5);
        assert_eq!(*b.get(), 1);
        assert_eq!(*seen.borrow(), vec![5]);

        b.sync(5);
        assert_eq!(*b.get(), 5);
        assert_eq!(seen.borrow().len(), 1);
    }
}
