//! Example schemas and state builders.
//!
//! A validator-registry state modeled on a beacon chain: a large list of
//! fixed-size validator records, a parallel balance list, a long vector of
//! randomness mixes and two small header containers. Large enough that
//! incremental re-hashing matters.

use rand::Rng;
use ssz_core::{
    boolean, bytes32, bytes48, bytes96, uint64, Container, SchemaError, Sedes, Value,
};

pub const VALIDATOR_REGISTRY_LIMIT: usize = 1 << 40;
pub const EPOCHS_PER_HISTORICAL_VECTOR: usize = 1 << 16;
pub const FAR_FUTURE_EPOCH: u64 = 0;

/// Field positions in the state container.
pub mod state_fields {
    pub const VALIDATORS: usize = 0;
    pub const BALANCES: usize = 1;
    pub const RANDAO_MIXES: usize = 2;
    pub const LATEST_BLOCK_HEADER: usize = 3;
    pub const ETH1_DATA: usize = 4;
}

/// The sedes of the example state and its parts.
#[derive(Debug, Clone)]
pub struct StateSchema {
    pub validator: Sedes,
    pub block_header: Sedes,
    pub eth1_data: Sedes,
    pub state: Sedes,
    historical_length: usize,
}

impl StateSchema {
    /// Build the schema with a randao vector of `historical_length` entries.
    pub fn new(historical_length: usize) -> Result<Self, SchemaError> {
        let validator = Sedes::container(vec![
            ("pubkey", bytes48()),
            ("withdrawal_credentials", bytes32()),
            ("effective_balance", uint64()),
            ("slashed", boolean()),
            ("activation_eligibility_epoch", uint64()),
            ("activation_epoch", uint64()),
            ("exit_epoch", uint64()),
            ("withdrawable_epoch", uint64()),
        ])?;
        let block_header = Sedes::container(vec![
            ("slot", uint64()),
            ("parent_root", bytes32()),
            ("state_root", bytes32()),
            ("body_root", bytes32()),
            ("signature", bytes96()),
        ])?;
        let eth1_data = Sedes::container(vec![
            ("deposit_root", bytes32()),
            ("deposit_count", uint64()),
            ("block_hash", bytes32()),
        ])?;
        let state = Sedes::container(vec![
            (
                "validators",
                Sedes::list(validator.clone(), VALIDATOR_REGISTRY_LIMIT)?,
            ),
            ("balances", Sedes::list(uint64(), VALIDATOR_REGISTRY_LIMIT)?),
            ("randao_mixes", Sedes::vector(bytes32(), historical_length)?),
            ("latest_block_header", block_header.clone()),
            ("eth1_data", eth1_data.clone()),
        ])?;

        Ok(Self {
            validator,
            block_header,
            eth1_data,
            state,
            historical_length,
        })
    }

    /// The full-size schema.
    pub fn standard() -> Result<Self, SchemaError> {
        Self::new(EPOCHS_PER_HISTORICAL_VECTOR)
    }

    pub fn historical_length(&self) -> usize {
        self.historical_length
    }

    /// The state sedes as a container, for field lookups.
    pub fn state_container(&self) -> Option<&Container> {
        match &self.state {
            Sedes::Container(c) => Some(c),
            _ => None,
        }
    }

    /// A state with `num_validators` fresh validators.
    pub fn make_state(&self, num_validators: u64) -> Value {
        Value::Container(vec![
            Value::Sequence((0..num_validators).map(make_validator).collect()),
            Value::Sequence((0..num_validators).map(|i| Value::Uint((i + 1000).into())).collect()),
            Value::Sequence(
                (0..self.historical_length as u64)
                    .map(|i| Value::Bytes(le_bytes(i, 32)))
                    .collect(),
            ),
            make_block_header(0x55),
            make_eth1_data(0x12),
        ])
    }
}

/// A not-yet-activated validator whose keys are derived from `seed`.
pub fn make_validator(seed: u64) -> Value {
    Value::Container(vec![
        Value::Bytes(le_bytes(seed, 48)),
        Value::Bytes(le_bytes(seed, 32)),
        Value::Uint(0),
        Value::Bool(false),
        Value::Uint(FAR_FUTURE_EPOCH.into()),
        Value::Uint(FAR_FUTURE_EPOCH.into()),
        Value::Uint(FAR_FUTURE_EPOCH.into()),
        Value::Uint(FAR_FUTURE_EPOCH.into()),
    ])
}

/// A slot-1 header signed with a repeated `signature_byte`.
pub fn make_block_header(signature_byte: u8) -> Value {
    Value::Container(vec![
        Value::Uint(1),
        Value::Bytes(vec![0x22; 32]),
        Value::Bytes(vec![0x22; 32]),
        Value::Bytes(vec![0x22; 32]),
        Value::Bytes(vec![signature_byte; 96]),
    ])
}

pub fn make_eth1_data(fill: u8) -> Value {
    Value::Container(vec![
        Value::Bytes(vec![fill; 32]),
        Value::Uint(1),
        Value::Bytes(vec![fill; 32]),
    ])
}

/// Apply a typical single-block change at `index`: bump a balance, replace a
/// validator, overwrite one randao mix and swap both headers.
///
/// Returns `false` if `index` is outside the registry or the value is not a
/// state built by [`StateSchema::make_state`].
pub fn update_state(state: &mut Value, index: usize) -> bool {
    let Some(fields) = state.as_items_mut() else {
        return false;
    };
    if fields.len() != 5 {
        return false;
    }

    let balance = fields[state_fields::BALANCES]
        .as_items_mut()
        .and_then(|balances| balances.get_mut(index));
    match balance {
        Some(Value::Uint(n)) => *n += 10,
        _ => return false,
    }

    match fields[state_fields::VALIDATORS]
        .as_items_mut()
        .and_then(|validators| validators.get_mut(index))
    {
        Some(slot) => *slot = make_validator(666),
        None => return false,
    }

    if let Some(mix) = fields[state_fields::RANDAO_MIXES]
        .as_items_mut()
        .and_then(|mixes| mixes.get_mut(index))
    {
        *mix = Value::Bytes(vec![0x56; 32]);
    }

    fields[state_fields::LATEST_BLOCK_HEADER] = make_block_header(0x66);
    fields[state_fields::ETH1_DATA] = make_eth1_data(0x22);
    true
}

/// Add a random amount to `count` randomly chosen balances.
pub fn perturb_balances<R: Rng>(state: &mut Value, rng: &mut R, count: usize) {
    let Some(balances) = state
        .as_items_mut()
        .and_then(|fields| fields.get_mut(state_fields::BALANCES))
        .and_then(Value::as_items_mut)
    else {
        return;
    };
    if balances.is_empty() {
        return;
    }
    for _ in 0..count {
        let index = rng.gen_range(0..balances.len());
        if let Value::Uint(n) = &mut balances[index] {
            *n += rng.gen_range(1..1_000);
        }
    }
}

fn le_bytes(n: u64, size: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; size];
    let raw = n.to_le_bytes();
    let len = raw.len().min(size);
    bytes[..len].copy_from_slice(&raw[..len]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ssz::{HashSession, SessionConfig};
    use ssz_core::SszSedes;

    fn small() -> StateSchema {
        StateSchema::new(64).unwrap()
    }

    #[test]
    fn test_validator_is_fixed_size() {
        let schema = small();
        assert_eq!(schema.validator.fixed_size().unwrap(), 48 + 32 + 8 + 1 + 8 * 4);
        assert_eq!(schema.block_header.fixed_size().unwrap(), 8 + 32 * 3 + 96);
        assert!(!schema.state.is_fixed_sized());
        let container = schema.state_container().unwrap();
        assert_eq!(container.field_index("randao_mixes"), Some(state_fields::RANDAO_MIXES));
    }

    #[test]
    fn test_state_roundtrip() {
        let schema = small();
        let state = schema.make_state(8);
        let bytes = schema.state.serialize(&state).unwrap();
        assert_eq!(schema.state.deserialize(&bytes).unwrap(), state);
    }

    #[test]
    fn test_incremental_rehash_matches_fresh() {
        let schema = small();
        let mut state = schema.make_state(32);
        let mut session = HashSession::new(SessionConfig::default());

        let before = session.hash_tree_root(&state, &schema.state).unwrap();
        assert!(update_state(&mut state, 10));
        let after = session.hash_tree_root(&state, &schema.state).unwrap();

        assert_ne!(before, after);
        assert_eq!(after, schema.state.hash_tree_root(&state).unwrap());
    }

    #[test]
    fn test_update_out_of_range() {
        let schema = small();
        let mut state = schema.make_state(4);
        assert!(!update_state(&mut state, 4));
        assert!(!update_state(&mut Value::Bool(true), 0));
    }

    #[test]
    fn test_perturb_balances_is_seeded() {
        let schema = small();
        let mut a = schema.make_state(16);
        let mut b = a.clone();
        perturb_balances(&mut a, &mut StdRng::seed_from_u64(0), 5);
        perturb_balances(&mut b, &mut StdRng::seed_from_u64(0), 5);
        assert_eq!(a, b);
        assert_ne!(a, schema.make_state(16));
    }
}
