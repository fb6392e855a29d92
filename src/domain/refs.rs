use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to a row in another collection. Nothing enforces that the
/// target still exists; callers resolve explicitly and must handle `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRef(pub Uuid);

impl UserRef {
    pub const COLLECTION: &'static str = "users";

    pub fn id(&self) -> Uuid {
        self.0
    }
}
