//! Lazy target binding through the parent track.
//!
//! A transform track never knows its target up front. The first time the
//! target is needed, the parent track is asked whether it can provide a bound
//! object; a hit is cached for the rest of the track's lifetime, a miss is
//! retried on the next access.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Opaque target handle (small string key).
pub type TargetHandle = String;

/// Capability of a track that is bound to a scene object.
pub trait BindingProvider {
    fn bound_object(&self) -> Option<TargetHandle>;
}

/// A node in the track tree, as seen by its children.
pub trait TrackNode {
    fn name(&self) -> &str;

    /// Binding capability, if this node has one.
    fn as_binding(&self) -> Option<&dyn BindingProvider> {
        None
    }
}

/// Non-owning link to a parent track.
pub type ParentRef = Weak<dyn TrackNode>;

/// Downgrade a shared parent into the link stored by child tracks.
pub fn parent_ref<T: TrackNode + 'static>(parent: &Rc<T>) -> ParentRef {
    let weak: Weak<T> = Rc::downgrade(parent);
    weak
}

/// Parent track that binds its subtree to one scene object.
#[derive(Debug, Default)]
pub struct BindTrack {
    name: String,
    bind_obj: RefCell<Option<TargetHandle>>,
}

impl BindTrack {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bind_obj: RefCell::new(None),
        }
    }

    pub fn bound_to(name: impl Into<String>, target: impl Into<TargetHandle>) -> Self {
        let track = Self::new(name);
        track.set_bound_object(Some(target.into()));
        track
    }

    /// Rebind (or unbind) this track. Children that already cached a target keep it.
    pub fn set_bound_object(&self, target: Option<TargetHandle>) {
        *self.bind_obj.borrow_mut() = target;
    }
}

impl BindingProvider for BindTrack {
    fn bound_object(&self) -> Option<TargetHandle> {
        self.bind_obj.borrow().clone()
    }
}

impl TrackNode for BindTrack {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_binding(&self) -> Option<&dyn BindingProvider> {
        Some(self)
    }
}

/// Parent link plus the cached target it resolved to.
#[derive(Clone, Default)]
pub struct Binding {
    parent: Option<ParentRef>,
    target: Option<TargetHandle>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("has_parent", &self.parent.is_some())
            .field("target", &self.target)
            .finish()
    }
}

impl Binding {
    pub fn new(parent: Option<ParentRef>) -> Self {
        Self {
            parent,
            target: None,
        }
    }

    #[inline]
    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    /// Cached target without attempting resolution.
    #[inline]
    pub fn cached(&self) -> Option<&TargetHandle> {
        self.target.as_ref()
    }

    /// Return the cached target, resolving it through the parent on a miss.
    pub fn resolve(&mut self) -> Option<&TargetHandle> {
        if self.target.is_none() {
            self.target = self
                .parent
                .as_ref()
                .and_then(Weak::upgrade)
                .and_then(|parent| parent.as_binding()?.bound_object());
        }
        self.target.as_ref()
    }
}
