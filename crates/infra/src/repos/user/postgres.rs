use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use weekfitter_notifier_domain::{User, ID};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
}

impl From<UserRaw> for User {
    fn from(u: UserRaw) -> Self {
        Self {
            id: u.user_uid.into(),
            email: u.email,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, email)
            VALUES($1, $2)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        let res = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to find user {}. Err: {:?}", user_id, e);
                None
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let res = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE lower(u.email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;

        match res {
            Ok(user) => user.map(|u| u.into()),
            Err(e) => {
                error!("Unable to find user by email. Err: {:?}", e);
                None
            }
        }
    }
}
