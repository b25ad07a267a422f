#![doc = include_str!("../README.md")]

use std::{
    cell::{Cell, Ref, RefCell},
    fmt,
    rc::{Rc, Weak},
};


type Callback<T> = Rc<dyn Fn(&T)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

struct Entry<T> {
    id: ListenerId,
    token: Weak<TokenState>,

    /// Cleared when the listener is removed during an edit. Cleared entries
    /// are dropped once the edit finishes.
    callback: Option<Callback<T>>,
}

/// Listener bookkeeping, shared weakly with every outstanding token.
struct Listeners<T> {
    editing: Cell<usize>,
    next_id: Cell<u64>,
    entries: RefCell<Vec<Entry<T>>>,
}

/// Lets a token unregister itself without knowing the observed type.
trait Detach {
    fn detach(&self, id: ListenerId);
}

impl<T> Detach for Listeners<T> {
    fn detach(&self, id: ListenerId) {
        // Callbacks may own other tokens, so they must be dropped after the
        // entries are released.
        let _removed = {
            let mut entries = self.entries.borrow_mut();
            match entries.iter().position(|entry| entry.id == id) {
                Some(index) if self.editing.get() > 0 => entries[index].callback.take(),
                Some(index) => entries.remove(index).callback,
                None => None,
            }
        };
    }
}

impl<T> Listeners<T> {
    fn compact(&self) {
        self.entries
            .borrow_mut()
            .retain(|entry| entry.callback.is_some());
    }
}

/// Marks an edit in progress, and cleans up after it even if a listener panics.
struct EditGuard<'a, T> {
    listeners: &'a Listeners<T>,
}

impl<'a, T> EditGuard<'a, T> {
    fn enter(listeners: &'a Listeners<T>) -> Option<Self> {
        if listeners.editing.get() > 0 {
            return None;
        }
        listeners.editing.set(listeners.editing.get() + 1);
        Some(Self { listeners })
    }
}

impl<T> Drop for EditGuard<'_, T> {
    fn drop(&mut self) {
        self.listeners.editing.set(self.listeners.editing.get() - 1);
        self.listeners.compact();
    }
}

/// A value that informs listeners when it is edited.
///
/// Listeners are registered with [`Observable::add_listener`], which returns a
/// [`ListenerToken`]. The listener stays registered for as long as the token
/// lives.
///
/// # Invariants
///
/// 1. Only one edit runs at a time; an edit started from inside another edit
///    is rejected.
/// 2. Listeners are invoked in registration order.
/// 3. A listener removed during an edit is never invoked again, including
///    later in the same edit.
/// 4. When the observable is dropped, every outstanding token is told exactly
///    once.
pub struct Observable<T> {
    value: RefCell<T>,
    listeners: Rc<Listeners<T>>,
}

impl<T> Observable<T> {
    /// Create an observable holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            listeners: Rc::new(Listeners {
                editing: Cell::new(0),
                next_id: Cell::new(0),
                entries: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Borrow the current value.
    ///
    /// Listeners may call this freely, including while they are being
    /// notified.
    ///
    /// # Panics
    ///
    /// Panics if called from inside the mutator passed to [`Self::edit`],
    /// where the value is being changed. Use [`Self::try_get`] where that can
    /// happen.
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Borrow the current value, or `None` if it is being changed by the
    /// mutator of a running edit.
    ///
    /// Never panics.
    pub fn try_get(&self) -> Option<Ref<'_, T>> {
        self.value.try_borrow().ok()
    }

    /// Run `f` with the current value.
    ///
    /// # Panics
    ///
    /// Same as [`Self::get`].
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Edit the value.
    ///
    /// `mutator` returns whether it changed the value; if it did, every
    /// registered listener is called once with the new value.
    ///
    /// Returns `false`, without calling `mutator`, if another edit of this
    /// observable is already running (for example, when called from a
    /// listener), or if a borrow returned by [`Self::get`] is still held.
    /// Otherwise returns `true`, whether or not anything changed.
    pub fn edit(&self, mutator: impl FnOnce(&mut T) -> bool) -> bool {
        let Some(_guard) = EditGuard::enter(&self.listeners) else {
            log::warn!("rejected an edit started while another edit was in progress");
            return false;
        };
        let Ok(mut value) = self.value.try_borrow_mut() else {
            log::warn!("rejected an edit while the value is borrowed");
            return false;
        };
        let changed = mutator(&mut *value);
        drop(value);
        if changed {
            self.notify();
        }
        true
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .entries
            .borrow()
            .iter()
            .filter(|entry| entry.callback.is_some())
            .count()
    }

    /// Remove a listener.
    ///
    /// This is the same as dropping `token`.
    pub fn remove_listener(&self, token: ListenerToken) {
        drop(token);
    }

    fn notify(&self) {
        let value = self.value.borrow();
        // Listeners added while notifying are not called until the next edit.
        let count = self.listeners.entries.borrow().len();
        for index in 0..count {
            let callback = self.listeners.entries.borrow()[index].callback.clone();
            if let Some(callback) = callback {
                callback(&value);
            }
        }
    }
}

impl<T: 'static> Observable<T> {
    /// Register `listener` to be called after each changing edit.
    ///
    /// The listener is removed when the returned token is dropped.
    #[must_use = "dropping the token removes the listener"]
    pub fn add_listener(&self, listener: impl Fn(&T) + 'static) -> ListenerToken {
        let id = ListenerId(self.listeners.next_id.get());
        self.listeners.next_id.set(id.0 + 1);

        let listeners: Rc<dyn Detach> = self.listeners.clone();
        let state = Rc::new(TokenState {
            id,
            owner: RefCell::new(Some(Rc::downgrade(&listeners))),
            on_destroyed: RefCell::new(None),
        });
        self.listeners.entries.borrow_mut().push(Entry {
            id,
            token: Rc::downgrade(&state),
            callback: Some(Rc::new(listener)),
        });
        log::trace!("registered listener {}", id.0);
        ListenerToken { state }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Observable");
        match self.value.try_borrow() {
            Ok(value) => debug.field("value", &*value),
            Err(_) => debug.field("value", &"<editing>"),
        };
        debug
            .field("listener_count", &self.listener_count())
            .finish()
    }
}

impl<T> Drop for Observable<T> {
    fn drop(&mut self) {
        let entries = std::mem::take(&mut *self.listeners.entries.borrow_mut());
        if !entries.is_empty() {
            log::trace!("observable dropped with {} listeners", entries.len());
        }
        for entry in entries {
            if let Some(token) = entry.token.upgrade() {
                token.object_destroyed();
            }
        }
    }
}

struct TokenState {
    id: ListenerId,
    owner: RefCell<Option<Weak<dyn Detach>>>,
    on_destroyed: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl TokenState {
    fn object_destroyed(&self) {
        self.owner.borrow_mut().take();
        let hook = self.on_destroyed.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
    }
}

/// Keeps a listener registered with an [`Observable`].
///
/// Dropping the token removes the listener. The token may outlive the
/// observable; use [`ListenerToken::object_alive`] or
/// [`ListenerToken::set_object_destroyed_callback`] to find out when that
/// happens.
pub struct ListenerToken {
    state: Rc<TokenState>,
}

impl ListenerToken {
    /// Whether the observable this token listens to still exists.
    #[must_use]
    pub fn object_alive(&self) -> bool {
        self.state.owner.borrow().is_some()
    }

    /// Set a function to call when the observable is dropped.
    ///
    /// Replaces any previously set function. It is called at most once, and
    /// never if the token is dropped first.
    pub fn set_object_destroyed_callback(&mut self, callback: impl FnOnce() + 'static) {
        *self.state.on_destroyed.borrow_mut() = Some(Box::new(callback));
    }
}

impl fmt::Debug for ListenerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerToken")
            .field("object_alive", &self.object_alive())
            .finish_non_exhaustive()
    }
}

impl Drop for ListenerToken {
    fn drop(&mut self) {
        let owner = self.state.owner.borrow_mut().take();
        if let Some(listeners) = owner.and_then(|owner| owner.upgrade()) {
            listeners.detach(self.state.id);
        }
    }
}
