use crate::shared::entity::{Entity, ID};

/// The recipient of reminders. Only the fields the notifier needs are
/// modelled here; registration and credentials live elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub email: String,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            email: email.into(),
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
