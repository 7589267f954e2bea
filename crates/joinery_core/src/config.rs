//! World configuration
//!
//! Plain serde data so it can be loaded from whatever format the host uses.

use serde::{Deserialize, Serialize};

/// Tunables applied when a [`World`](crate::World) is created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Id returned by the first `new_entity_id` call.
    pub first_entity_id: u64,
    /// Initial record reservation for each component store.
    pub store_capacity: usize,
    /// Initial value reservation for each static store.
    pub static_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            first_entity_id: 1,
            store_capacity: 0,
            static_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: WorldConfig = serde_json::from_str(r#"{ "store_capacity": 256 }"#).unwrap();
        assert_eq!(config.first_entity_id, 1);
        assert_eq!(config.store_capacity, 256);
        assert_eq!(config.static_capacity, 0);
    }

    #[test]
    fn round_trips_through_json() {
        let config = WorldConfig {
            first_entity_id: 100,
            store_capacity: 8,
            static_capacity: 2,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<WorldConfig>(&json).unwrap(), config);
    }
}
