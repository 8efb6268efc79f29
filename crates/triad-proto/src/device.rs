//! Device-topology lookup.
//!
//! A device registry answers "where do the four roles live on this
//! device". Absence of an entry yields the default identity layout; the
//! caller decides whether that is acceptable.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ProtoResult;
use crate::role::RegisterMap;

/// Physical qubit assignment for the four roles of a single instance,
/// in `[secret, alice, bob, charlie]` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Physical qubit indices.
    pub qubits: [u32; 4],
}

impl RoleAssignment {
    /// Create an assignment.
    pub fn new(qubits: [u32; 4]) -> Self {
        Self { qubits }
    }

    /// Convert into a single-instance register map.
    pub fn register_map(&self) -> ProtoResult<RegisterMap> {
        RegisterMap::with_physical(1, self.qubits.to_vec())
    }
}

/// Lookup of role assignments by device name.
pub trait DeviceRegistry {
    /// Return the role assignment for `device`, if the registry knows it.
    fn lookup(&self, device: &str) -> Option<RoleAssignment>;
}

/// A map-backed registry, filled at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    devices: FxHashMap<String, RoleAssignment>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device.
    pub fn insert(&mut self, device: impl Into<String>, assignment: RoleAssignment) {
        self.devices.insert(device.into(), assignment);
    }
}

impl DeviceRegistry for StaticRegistry {
    fn lookup(&self, device: &str) -> Option<RoleAssignment> {
        self.devices.get(device).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use triad_ir::QubitId;

    #[test]
    fn test_lookup() {
        let mut registry = StaticRegistry::new();
        registry.insert("aspen-4q-a", RoleAssignment::new([7, 0, 1, 2]));

        let assignment = registry.lookup("aspen-4q-a").unwrap();
        let map = assignment.register_map().unwrap();
        assert_eq!(map.qubit(Role::Secret, 0), QubitId(7));
        assert_eq!(map.qubit(Role::Bob, 0), QubitId(1));

        assert!(registry.lookup("unknown-device").is_none());
    }

    #[test]
    fn test_degenerate_assignment_rejected() {
        let assignment = RoleAssignment::new([0, 0, 1, 2]);
        assert!(assignment.register_map().is_err());
    }
}
