//! Protocol roles and register allocation.

use serde::{Deserialize, Serialize};
use triad_ir::QubitId;

use crate::error::{ProtoError, ProtoResult};

/// The four logical participants of one protocol instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The secret holder (the state to be shared).
    Secret,
    /// Alice, holder of the first GHZ qubit; performs the Bell measurement
    /// together with the secret qubit.
    Alice,
    /// Bob, holder of the second GHZ qubit; measures in the X basis.
    Bob,
    /// Charlie, holder of the third GHZ qubit; reconstructs the secret.
    Charlie,
}

impl Role {
    /// All roles, in stripe order.
    pub const ALL: [Role; 4] = [Role::Secret, Role::Alice, Role::Bob, Role::Charlie];

    /// Stripe offset of this role within a register map.
    pub fn offset(&self) -> u32 {
        match self {
            Role::Secret => 0,
            Role::Alice => 1,
            Role::Bob => 2,
            Role::Charlie => 3,
        }
    }

    /// Human-readable role name.
    pub fn name(&self) -> &'static str {
        match self {
            Role::Secret => "secret",
            Role::Alice => "alice",
            Role::Bob => "bob",
            Role::Charlie => "charlie",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Mapping from Role x InstanceIndex to circuit qubit indices for `n`
/// parallel protocol instances.
///
/// The identity layout is *striped*: instance `i` of role `r` sits at
/// qubit `i + r.offset() * n`, so per-role operations can be issued as one
/// instruction per instance without recomputing offsets. The mapping is
/// always a bijection onto the `4n` qubits it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMap {
    n: u32,
    /// Flat qubit table indexed by `role.offset() * n + i`.
    qubits: Vec<QubitId>,
    /// One past the highest physical index used.
    num_qubits: u32,
}

impl RegisterMap {
    /// Allocate the striped identity layout for `n` instances.
    pub fn allocate(n: u32) -> ProtoResult<Self> {
        if n == 0 {
            return Err(ProtoError::InvalidArity { n });
        }
        let qubits = (0..4 * n).map(QubitId).collect();
        Ok(Self {
            n,
            qubits,
            num_qubits: 4 * n,
        })
    }

    /// Build a register map over physical qubit indices, e.g. from a
    /// device-topology query.
    ///
    /// `indices` is ordered by stripe: all Secret instances, then Alice,
    /// Bob, Charlie. Its length must be `4n` and all entries distinct.
    pub fn with_physical(n: u32, indices: Vec<u32>) -> ProtoResult<Self> {
        if n == 0 {
            return Err(ProtoError::InvalidArity { n });
        }
        if indices.len() != 4 * n as usize {
            return Err(ProtoError::InvalidAssignment(format!(
                "expected {} physical indices for {n} instances, got {}",
                4 * n,
                indices.len()
            )));
        }
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(ProtoError::InvalidAssignment(
                "physical indices must be distinct".to_string(),
            ));
        }
        let num_qubits = sorted.last().copied().unwrap_or(0) + 1;
        Ok(Self {
            n,
            qubits: indices.into_iter().map(QubitId).collect(),
            num_qubits,
        })
    }

    /// Number of protocol instances.
    pub fn instances(&self) -> u32 {
        self.n
    }

    /// Number of qubits a circuit using this map must provide.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The qubit holding `role` for instance `i`.
    ///
    /// # Panics
    ///
    /// Panics when `i >= instances()`.
    pub fn qubit(&self, role: Role, i: u32) -> QubitId {
        assert!(i < self.n, "instance {i} out of range (n = {})", self.n);
        self.qubits[(role.offset() * self.n + i) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_striped_layout() {
        let map = RegisterMap::allocate(3).unwrap();
        assert_eq!(map.qubit(Role::Secret, 1), QubitId(1));
        assert_eq!(map.qubit(Role::Alice, 1), QubitId(4));
        assert_eq!(map.qubit(Role::Bob, 1), QubitId(7));
        assert_eq!(map.qubit(Role::Charlie, 1), QubitId(10));
        assert_eq!(map.num_qubits(), 12);
    }

    #[test]
    fn test_zero_instances_rejected() {
        assert!(matches!(
            RegisterMap::allocate(0),
            Err(ProtoError::InvalidArity { n: 0 })
        ));
    }

    #[test]
    fn test_physical_assignment() {
        let map = RegisterMap::with_physical(1, vec![5, 2, 9, 0]).unwrap();
        assert_eq!(map.qubit(Role::Secret, 0), QubitId(5));
        assert_eq!(map.qubit(Role::Charlie, 0), QubitId(0));
        assert_eq!(map.num_qubits(), 10);
    }

    #[test]
    fn test_physical_assignment_rejects_collisions() {
        assert!(matches!(
            RegisterMap::with_physical(1, vec![1, 2, 2, 3]),
            Err(ProtoError::InvalidAssignment(_))
        ));
        assert!(matches!(
            RegisterMap::with_physical(2, vec![0, 1, 2]),
            Err(ProtoError::InvalidAssignment(_))
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_instance_out_of_range_panics() {
        let map = RegisterMap::allocate(2).unwrap();
        let _ = map.qubit(Role::Bob, 2);
    }
}
