mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use weekfitter_notifier_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    async fn find_by_email(&self, email: &str) -> Option<User>;
}
