// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed output/input ports and the data hand-off protocol between stages.
//!
//! An output port pushes one data item per firing to every subscribed input
//! port. Each output-to-input edge is tagged at chain-construction time with an
//! [`Ownership`]: exactly one edge per output is `Owned` (that subscriber may
//! take the value without copying), every other edge is `Shared` (those
//! subscribers receive an independent view of the same logical value).
//!
//! Input ports buffer arriving items keyed by run id, because pipelining means
//! several runs' data can be outstanding at once: the upstream module may
//! already fire for run 9 while the downstream module still works on run 7.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::errors::{BuildError, ModuleError};

/// Runtime type tag of a data item, pairing the `TypeId` with a readable name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for the type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

/// Per-edge hand-off mode, decided once during chain construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownership {
    /// The subscriber may take the value itself; exactly one edge per output.
    Owned,
    /// The subscriber receives a view and must copy if it needs the value.
    Shared,
}

/// One buffered data item: a run id, a runtime type tag, the value, and the
/// hand-off mode of the edge it arrived on.
pub struct Packet {
    id: u64,
    tag: TypeTag,
    ownership: Ownership,
    value: Arc<dyn Any + Send + Sync>,
}

impl Packet {
    /// Run id this item belongs to.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Borrow the value as `T`, or `None` if the tag does not match.
    pub fn view<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Consume the packet and return the value as `T`.
    ///
    /// On the `Owned` edge this moves the value out without copying once all
    /// `Shared` views have been consumed; otherwise it falls back to a clone.
    pub fn into_value<T: Any + Send + Sync + Clone>(self) -> Option<T> {
        let arc = self.value.downcast::<T>().ok()?;
        Some(match Arc::try_unwrap(arc) {
            Ok(value) => value,
            Err(shared) => (*shared).clone(),
        })
    }
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .field("ownership", &self.ownership)
            .finish()
    }
}

/// Named input port buffering data items keyed by run id.
pub struct InputPort {
    name: String,
    accepts: Vec<TypeTag>,
    buffer: Mutex<BTreeMap<u64, Packet>>,
}

impl InputPort {
    pub(crate) fn new(name: String, accepts: Vec<TypeTag>) -> Self {
        Self {
            name,
            accepts,
            buffer: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self) -> &[TypeTag] {
        &self.accepts
    }

    pub fn accepts_type(&self, tag: TypeTag) -> bool {
        self.accepts.contains(&tag)
    }

    /// Number of buffered items, one per outstanding run id.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn insert(&self, packet: Packet) {
        self.lock().insert(packet.id(), packet);
    }

    /// Remove and return the item buffered for `id`.
    pub fn take(&self, id: u64) -> Option<Packet> {
        self.lock().remove(&id)
    }

    /// Evict every buffered item whose id is less than or equal to `id`.
    ///
    /// Returns the number of evicted items. Used on failure recovery: the
    /// failed run and everything queued before it is unusable.
    pub(crate) fn evict_through(&self, id: u64) -> usize {
        let mut buffer = self.lock();
        let keep = buffer.split_off(&(id + 1));
        let evicted = buffer.len();
        *buffer = keep;
        evicted
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<u64, Packet>> {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Named output port with its declared type set and subscriber list.
///
/// Subscribers are wired once during chain construction; firing is read-only
/// on the port itself, so a module can fire from its serialized turn without
/// further locking.
pub struct OutputPort {
    name: String,
    produces: Vec<TypeTag>,
    targets: Vec<(Arc<InputPort>, Ownership)>,
}

impl OutputPort {
    pub(crate) fn new(name: String, produces: Vec<TypeTag>) -> Self {
        Self {
            name,
            produces,
            targets: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn produces(&self) -> &[TypeTag] {
        &self.produces
    }

    pub fn subscriber_count(&self) -> usize {
        self.targets.len()
    }

    /// Subscribe `input` to this output with the given hand-off mode.
    ///
    /// At most one subscriber per output may be `Owned`.
    pub(crate) fn connect(
        &mut self,
        input: Arc<InputPort>,
        ownership: Ownership,
    ) -> Result<(), BuildError> {
        if ownership == Ownership::Owned
            && self.targets.iter().any(|(_, o)| *o == Ownership::Owned)
        {
            return Err(BuildError::DuplicateOwnedSubscriber {
                output: self.name.clone(),
            });
        }
        self.targets.push((input, ownership));
        Ok(())
    }

    /// Push `value` tagged with `id` to every subscriber.
    ///
    /// Fails if `T` is not in the declared type set of this output.
    pub fn fire<T: Any + Send + Sync>(&self, id: u64, value: T) -> Result<(), ModuleError> {
        let tag = TypeTag::of::<T>();
        if !self.produces.contains(&tag) {
            return Err(ModuleError::UndeclaredOutputType {
                output: self.name.clone(),
                tag,
            });
        }

        let value: Arc<dyn Any + Send + Sync> = Arc::new(value);
        for (input, ownership) in &self.targets {
            input.insert(Packet {
                id,
                tag,
                ownership: *ownership,
                value: Arc::clone(&value),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_input(name: &str) -> Arc<InputPort> {
        Arc::new(InputPort::new(name.to_string(), vec![TypeTag::of::<String>()]))
    }

    #[test]
    fn buffers_several_ids_and_retrieves_by_id() {
        let input = string_input("in");
        let mut output = OutputPort::new("out".to_string(), vec![TypeTag::of::<String>()]);
        output.connect(Arc::clone(&input), Ownership::Owned).unwrap();

        output.fire(3, "three".to_string()).unwrap();
        output.fire(7, "seven".to_string()).unwrap();
        output.fire(5, "five".to_string()).unwrap();
        assert_eq!(input.pending(), 3);

        let packet = input.take(5).expect("id 5 buffered");
        assert_eq!(packet.view::<String>().unwrap(), "five");
        assert_eq!(input.pending(), 2);
        assert!(input.take(5).is_none());
    }

    #[test]
    fn evicts_everything_up_to_and_including_id() {
        let input = string_input("in");
        let mut output = OutputPort::new("out".to_string(), vec![TypeTag::of::<String>()]);
        output.connect(Arc::clone(&input), Ownership::Owned).unwrap();

        for id in [1u64, 2, 4, 9] {
            output.fire(id, format!("run {id}")).unwrap();
        }

        assert_eq!(input.evict_through(4), 3);
        assert_eq!(input.pending(), 1);
        assert!(input.take(9).is_some());
    }

    #[test]
    fn fan_out_marks_exactly_one_owned_edge() {
        let first = string_input("first");
        let last = string_input("last");
        let mut output = OutputPort::new("out".to_string(), vec![TypeTag::of::<String>()]);
        output.connect(Arc::clone(&first), Ownership::Shared).unwrap();
        output.connect(Arc::clone(&last), Ownership::Owned).unwrap();

        output.fire(11, "payload".to_string()).unwrap();

        let shared = first.take(11).unwrap();
        let owned = last.take(11).unwrap();
        assert_eq!(shared.ownership(), Ownership::Shared);
        assert_eq!(owned.ownership(), Ownership::Owned);

        // Same logical value and id on both edges.
        assert_eq!(shared.id(), owned.id());
        assert_eq!(shared.view::<String>(), owned.view::<String>());

        // Once the shared view is consumed the owned edge can move the value.
        let copy: String = shared.into_value().unwrap();
        let moved: String = owned.into_value().unwrap();
        assert_eq!(copy, "payload");
        assert_eq!(moved, "payload");
    }

    #[test]
    fn second_owned_subscriber_is_rejected() {
        let a = string_input("a");
        let b = string_input("b");
        let mut output = OutputPort::new("out".to_string(), vec![TypeTag::of::<String>()]);
        output.connect(a, Ownership::Owned).unwrap();

        let err = output.connect(b, Ownership::Owned).unwrap_err();
        assert!(matches!(err, BuildError::DuplicateOwnedSubscriber { .. }));
    }

    #[test]
    fn firing_an_undeclared_type_is_an_error() {
        let output = OutputPort::new("out".to_string(), vec![TypeTag::of::<String>()]);
        let err = output.fire(0, 42u32).unwrap_err();
        assert!(matches!(err, ModuleError::UndeclaredOutputType { .. }));
    }
}
