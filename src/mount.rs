//! Host mount targets
//!
//! A [`MountTarget`] stands for the host container an editor is placed in.
//! Editors register a surface on construction and remove it when dropped.
//! Clones share the same target.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{EditorError, Result};

static NEXT_MOUNT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one editor surface inside a mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(u64);

#[derive(Debug)]
struct MountState {
    attached: bool,
    surfaces: Vec<SurfaceId>,
}

/// Handle to a host container
#[derive(Debug, Clone)]
pub struct MountTarget {
    id: u64,
    state: Rc<RefCell<MountState>>,
}

impl MountTarget {
    /// A container attached to the host document
    pub fn new() -> Self {
        Self::with_attached(true)
    }

    /// A container not (yet) attached anywhere
    pub fn detached() -> Self {
        Self::with_attached(false)
    }

    fn with_attached(attached: bool) -> Self {
        Self {
            id: NEXT_MOUNT_ID.fetch_add(1, Ordering::Relaxed),
            state: Rc::new(RefCell::new(MountState {
                attached,
                surfaces: Vec::new(),
            })),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached
    }

    pub fn attach(&self) {
        self.state.borrow_mut().attached = true;
    }

    /// Detach from the host. Existing surfaces stay registered.
    pub fn detach(&self) {
        self.state.borrow_mut().attached = false;
    }

    /// Number of editor surfaces currently mounted here
    pub fn surface_count(&self) -> usize {
        self.state.borrow().surfaces.len()
    }

    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.state.borrow().surfaces.clone()
    }

    /// Register a new child surface
    pub(crate) fn add_surface(&self) -> Result<SurfaceId> {
        let mut state = self.state.borrow_mut();
        if !state.attached {
            return Err(EditorError::DetachedMount(self.id));
        }
        let id = SurfaceId(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed));
        state.surfaces.push(id);
        Ok(id)
    }

    pub(crate) fn remove_surface(&self, surface: SurfaceId) {
        self.state.borrow_mut().surfaces.retain(|s| *s != surface);
    }
}

impl Default for MountTarget {
    fn default() -> Self {
        Self::new()
    }
}

/// A surface registered on a mount, removed again on drop
#[derive(Debug)]
pub(crate) struct Surface {
    mount: MountTarget,
    id: SurfaceId,
}

impl Surface {
    pub(crate) fn attach(mount: &MountTarget) -> Result<Self> {
        let id = mount.add_surface()?;
        Ok(Self {
            mount: mount.clone(),
            id,
        })
    }

    pub(crate) fn id(&self) -> SurfaceId {
        self.id
    }

    pub(crate) fn mount(&self) -> &MountTarget {
        &self.mount
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.mount.remove_surface(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_lifecycle() {
        let mount = MountTarget::new();
        let a = Surface::attach(&mount).unwrap();
        let b = Surface::attach(&mount).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(mount.surface_count(), 2);

        drop(a);
        assert_eq!(mount.surfaces(), vec![b.id()]);
    }

    #[test]
    fn test_detached_mount_rejects_surfaces() {
        let mount = MountTarget::detached();
        let err = Surface::attach(&mount).unwrap_err();
        assert!(matches!(err, EditorError::DetachedMount(id) if id == mount.id()));
        assert_eq!(mount.surface_count(), 0);

        mount.attach();
        assert!(Surface::attach(&mount).is_ok());
    }

    #[test]
    fn test_clones_share_state() {
        let mount = MountTarget::new();
        let clone = mount.clone();
        let _surface = Surface::attach(&clone).unwrap();
        assert_eq!(mount.surface_count(), 1);
        assert_eq!(mount.id(), clone.id());
    }

    #[test]
    fn test_detach_keeps_existing_surfaces() {
        let mount = MountTarget::new();
        assert!(mount.is_attached());
        let surface = Surface::attach(&mount).unwrap();

        mount.detach();
        assert!(!mount.is_attached());
        assert!(Surface::attach(&mount).is_err());
        assert_eq!(mount.surfaces(), vec![surface.id()]);
    }
}
