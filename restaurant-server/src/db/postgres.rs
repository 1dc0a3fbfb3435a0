//! PostgreSQL profile store

use async_trait::async_trait;
use shared::models::{RestaurantPatch, RestaurantProfile, RestaurantStatus};
use shared::util::now_millis;
use sqlx::PgPool;
use sqlx::types::Json;

use super::store::{ProfileStore, StoreError, StoreResult};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const SELECT_COLUMNS: &str = "id, owner, name, email, phone, address, description, cuisine, \
     website, opening_hours, logo, cover_photo, images, status, created_at, updated_at";

/// Row shape of the `restaurants` table
#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: String,
    owner: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    description: Option<String>,
    cuisine: Json<Vec<String>>,
    website: Option<String>,
    opening_hours: Option<String>,
    logo: Option<String>,
    cover_photo: Option<String>,
    images: Json<Vec<String>>,
    status: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<RestaurantRow> for RestaurantProfile {
    type Error = StoreError;

    fn try_from(row: RestaurantRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<RestaurantStatus>()
            .map_err(|reason| StoreError::Corrupt {
                id: row.id.clone(),
                reason,
            })?;
        Ok(Self {
            id: row.id,
            owner: row.owner,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            description: row.description,
            cuisine: row.cuisine.0,
            website: row.website,
            opening_hours: row.opening_hours,
            logo: row.logo,
            cover_photo: row.cover_photo,
            images: row.images.0,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// sqlx-backed store
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self, BoxError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<RestaurantProfile>> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM restaurants WHERE id = $1");
        let row: Option<RestaurantRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(RestaurantProfile::try_from).transpose()
    }

    async fn update_partial(
        &self,
        id: &str,
        patch: RestaurantPatch,
    ) -> StoreResult<RestaurantProfile> {
        let sql = format!(
            r#"
            UPDATE restaurants SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                address = COALESCE($5, address),
                description = COALESCE($6, description),
                cuisine = COALESCE($7, cuisine),
                website = COALESCE($8, website),
                opening_hours = COALESCE($9, opening_hours),
                logo = COALESCE($10, logo),
                cover_photo = COALESCE($11, cover_photo),
                images = COALESCE($12, images),
                status = COALESCE($13, status),
                updated_at = $14
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
        );
        let row: Option<RestaurantRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(patch.name)
            .bind(patch.email)
            .bind(patch.phone)
            .bind(patch.address)
            .bind(patch.description)
            .bind(patch.cuisine.map(Json))
            .bind(patch.website)
            .bind(patch.opening_hours)
            .bind(patch.logo)
            .bind(patch.cover_photo)
            .bind(patch.images.map(Json))
            .bind(patch.status.map(|s| s.as_str()))
            .bind(now_millis())
            .fetch_optional(&self.pool)
            .await?;

        row.ok_or_else(|| StoreError::NotFound(format!("restaurant {id}")))?
            .try_into()
    }

    async fn insert(&self, profile: RestaurantProfile) -> StoreResult<RestaurantProfile> {
        let sql = format!(
            r#"
            INSERT INTO restaurants (
                id, owner, name, email, phone, address, description, cuisine,
                website, opening_hours, logo, cover_photo, images, status,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {SELECT_COLUMNS}
            "#
        );
        let row: RestaurantRow = sqlx::query_as(&sql)
            .bind(&profile.id)
            .bind(&profile.owner)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.address)
            .bind(&profile.description)
            .bind(Json(&profile.cuisine))
            .bind(&profile.website)
            .bind(&profile.opening_hours)
            .bind(&profile.logo)
            .bind(&profile.cover_photo)
            .bind(Json(&profile.images))
            .bind(profile.status.as_str())
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .fetch_one(&self.pool)
            .await?;
        row.try_into()
    }

    async fn delete(&self, id: &str) -> StoreResult<Option<RestaurantProfile>> {
        let sql = format!("DELETE FROM restaurants WHERE id = $1 RETURNING {SELECT_COLUMNS}");
        let row: Option<RestaurantRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(RestaurantProfile::try_from).transpose()
    }
}
