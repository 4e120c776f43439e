//! Device registry — the single owner of every simulated device.
//!
//! Devices are kept in creation order, which is also the order rules visit
//! them and the order the dashboard lists them within a room.

use std::collections::HashMap;

use homesim_domain::device::{Attribute, AttributeValue, Device, DeviceKind};
use homesim_domain::error::{HomeError, UnknownDeviceError};
use homesim_domain::id::DeviceId;
use homesim_domain::room::Room;
use homesim_domain::time::Timestamp;

/// In-memory store of devices, indexed by id.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
    index: HashMap<DeviceId, usize>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a device and take ownership of it.
    ///
    /// `initial` values are applied in order through the same checks as
    /// [`set_attribute`](Self::set_attribute).
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Validation`] for a blank name or room, or the first
    /// error raised by an initial attribute. Nothing is stored on failure.
    #[tracing::instrument(skip(self, initial))]
    pub fn create_device(
        &mut self,
        kind: DeviceKind,
        name: &str,
        room: &str,
        initial: impl IntoIterator<Item = (Attribute, AttributeValue)>,
    ) -> Result<DeviceId, HomeError> {
        let device = Device::builder()
            .kind(kind)
            .name(name)
            .room(room)
            .attributes(initial)
            .build()?;
        let id = device.id();
        self.index.insert(id, self.devices.len());
        self.devices.push(device);
        tracing::debug!(%id, "device created");
        Ok(id)
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownDevice`] when no device with `id` exists.
    pub fn get(&self, id: DeviceId) -> Result<&Device, HomeError> {
        self.index
            .get(&id)
            .map(|&i| &self.devices[i])
            .ok_or_else(|| UnknownDeviceError { id }.into())
    }

    fn get_mut(&mut self, id: DeviceId) -> Result<&mut Device, HomeError> {
        match self.index.get(&id) {
            Some(&i) => Ok(&mut self.devices[i]),
            None => Err(UnknownDeviceError { id }.into()),
        }
    }

    /// Write one attribute of one device, stamping it with `at`.
    ///
    /// # Errors
    ///
    /// - [`HomeError::UnknownDevice`] for an invalid id
    /// - [`HomeError::OutOfRange`] when the value violates the attribute's bounds
    /// - [`HomeError::Validation`] for unsupported, read-only or mistyped writes
    ///
    /// A rejected write leaves the device unchanged.
    #[tracing::instrument(skip(self, value, at), fields(%value))]
    pub fn set_attribute(
        &mut self,
        id: DeviceId,
        attribute: Attribute,
        value: &AttributeValue,
        at: Timestamp,
    ) -> Result<(), HomeError> {
        self.get_mut(id)?.set(attribute, value, at)
    }

    /// Flip a device's power flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownDevice`] for an invalid id.
    #[tracing::instrument(skip(self, at))]
    pub fn toggle_power(&mut self, id: DeviceId, at: Timestamp) -> Result<bool, HomeError> {
        Ok(self.get_mut(id)?.toggle_power(at))
    }

    /// Every device, in creation order.
    #[must_use]
    pub fn list(&self) -> &[Device] {
        &self.devices
    }

    /// Devices grouped by room. Rooms appear in first-seen order, devices in
    /// creation order.
    #[must_use]
    pub fn by_room(&self) -> Vec<(&Room, Vec<&Device>)> {
        let mut groups: Vec<(&Room, Vec<&Device>)> = Vec::new();
        for device in &self.devices {
            match groups.iter_mut().find(|(room, _)| *room == device.room()) {
                Some((_, members)) => members.push(device),
                None => groups.push((device.room(), vec![device])),
            }
        }
        groups
    }

    /// Distinct rooms in first-seen order.
    #[must_use]
    pub fn rooms(&self) -> Vec<&Room> {
        self.by_room().into_iter().map(|(room, _)| room).collect()
    }

    /// Devices of `kind`, in creation order.
    pub fn of_kind(&self, kind: DeviceKind) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |d| d.kind() == kind)
    }

    /// First device whose name matches exactly.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    /// Number of powered devices.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.devices.iter().filter(|d| d.power()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Mutable access for simulation steps, which bypass user-facing checks
    /// to update read-only physics such as room temperature.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Device> {
        self.devices.iter_mut()
    }
}
