//! Stadium (venue) data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stadium.
pub type StadiumId = Uuid;

/// A venue. Matches are assigned a stadium by index rotation only; there is
/// no capacity or availability model.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub id: StadiumId,
    pub name: String,
}

impl Stadium {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
