use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use weekfitter_notifier_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        find_by(&self.users, |user| user.email.eq_ignore_ascii_case(email))
            .into_iter()
            .next()
    }
}
