use async_trait::async_trait;
use bigdecimal::BigDecimal;
use sqlx::Error;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::servicemodel::{Service, ServiceImage, ServiceListing};

#[async_trait]
pub trait ServiceExt {
    async fn create_service(
        &self,
        seller_id: Uuid,
        title: String,
        description: String,
        price: BigDecimal,
        category: String,
        location: Option<String>,
        image_urls: Vec<String>,
    ) -> Result<Service, Error>;

    /// Public listing. `search` is a case-insensitive substring match on the
    /// title, `category` an exact match.
    async fn get_all_services(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<ServiceListing>, Error>;

    async fn get_seller_services(&self, seller_id: Uuid) -> Result<Vec<Service>, Error>;

    async fn get_service_by_id(&self, service_id: Uuid) -> Result<Option<Service>, Error>;

    async fn get_service_images(&self, service_id: Uuid) -> Result<Vec<ServiceImage>, Error>;

    /// Owner-scoped update; returns None when the service does not exist or
    /// is not owned by `seller_id`.
    async fn update_service(
        &self,
        service_id: Uuid,
        seller_id: Uuid,
        title: String,
        description: String,
        price: BigDecimal,
        category: String,
        location: Option<String>,
    ) -> Result<Option<Service>, Error>;

    /// Owner-scoped delete; returns false when nothing was deleted.
    async fn delete_service(&self, service_id: Uuid, seller_id: Uuid) -> Result<bool, Error>;
}

#[async_trait]
impl ServiceExt for DBClient {
    async fn create_service(
        &self,
        seller_id: Uuid,
        title: String,
        description: String,
        price: BigDecimal,
        category: String,
        location: Option<String>,
        image_urls: Vec<String>,
    ) -> Result<Service, Error> {
        let mut tx = self.pool.begin().await?;

        let service = sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (seller_id, title, description, price, category, location)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, seller_id, title, description, price, category, location, created_at
            "#,
        )
        .bind(seller_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(location)
        .fetch_one(&mut *tx)
        .await?;

        for (position, image_url) in image_urls.into_iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO service_images (service_id, image_url, position)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(service.id)
            .bind(image_url)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(service)
    }

    async fn get_all_services(
        &self,
        search: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<ServiceListing>, Error> {
        sqlx::query_as::<_, ServiceListing>(
            r#"
            SELECT s.id, s.seller_id, s.title, s.description, s.price, s.category,
                   s.location, u.username AS seller_name, s.created_at,
                   (SELECT si.image_url FROM service_images si
                    WHERE si.service_id = s.id
                    ORDER BY si.position ASC LIMIT 1) AS cover_image
            FROM services s
            JOIN users u ON s.seller_id = u.id
            WHERE ($1::text IS NULL OR s.title ILIKE '%' || $1 || '%')
              AND ($2::text IS NULL OR s.category = $2)
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(search)
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_seller_services(&self, seller_id: Uuid) -> Result<Vec<Service>, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, seller_id, title, description, price, category, location, created_at
            FROM services
            WHERE seller_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_service_by_id(&self, service_id: Uuid) -> Result<Option<Service>, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, seller_id, title, description, price, category, location, created_at
            FROM services
            WHERE id = $1
            "#,
        )
        .bind(service_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_service_images(&self, service_id: Uuid) -> Result<Vec<ServiceImage>, Error> {
        sqlx::query_as::<_, ServiceImage>(
            r#"
            SELECT id, service_id, image_url, position
            FROM service_images
            WHERE service_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn update_service(
        &self,
        service_id: Uuid,
        seller_id: Uuid,
        title: String,
        description: String,
        price: BigDecimal,
        category: String,
        location: Option<String>,
    ) -> Result<Option<Service>, Error> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET title = $3, description = $4, price = $5, category = $6, location = $7
            WHERE id = $1 AND seller_id = $2
            RETURNING id, seller_id, title, description, price, category, location, created_at
            "#,
        )
        .bind(service_id)
        .bind(seller_id)
        .bind(title)
        .bind(description)
        .bind(price)
        .bind(category)
        .bind(location)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_service(&self, service_id: Uuid, seller_id: Uuid) -> Result<bool, Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM services
            WHERE id = $1 AND seller_id = $2
            "#,
        )
        .bind(service_id)
        .bind(seller_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
