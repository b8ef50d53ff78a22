use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::route::{Route, RouteStop, RouteUpdate, RouteWithStops, StopType, StopUpdate},
};

/// Route and route stop store for database operations
pub struct RouteStore {
    pool: DbPool,
}

impl RouteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Route>> {
        let routes = sqlx::query_as::<_, Route>("SELECT * FROM route ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(routes)
    }

    /// Routes with their stops attached in stop_order, for the dashboard
    pub async fn get_all_with_stops(&self) -> Result<Vec<RouteWithStops>> {
        let routes = self.get_all().await?;

        let mut out = Vec::with_capacity(routes.len());
        for route in routes {
            let stops = self.stops_for_route(route.id).await?;
            out.push(RouteWithStops { route, stops });
        }

        Ok(out)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Route>> {
        let route = sqlx::query_as::<_, Route>("SELECT * FROM route WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(route)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Route> {
        self.find_by_id(id).await?.ok_or(AppError::NotFound("route"))
    }

    pub async fn insert(&self, name: &str, total_km: Option<i64>) -> Result<Route> {
        let id = sqlx::query("INSERT INTO route (name, total_km) VALUES (?, ?)")
            .bind(name)
            .bind(total_km)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i64, update: RouteUpdate) -> Result<Route> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE route
            SET name = COALESCE(?, name),
                total_km = COALESCE(?, total_km)
            WHERE id = ?
            "#,
        )
        .bind(update.name)
        .bind(update.total_km)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn stops_for_route(&self, route_id: i64) -> Result<Vec<RouteStop>> {
        let stops = sqlx::query_as::<_, RouteStop>(
            "SELECT * FROM route_stop WHERE route_id = ? ORDER BY stop_order ASC",
        )
        .bind(route_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stops)
    }

    pub async fn get_stop_by_id(&self, id: i64) -> Result<RouteStop> {
        sqlx::query_as::<_, RouteStop>("SELECT * FROM route_stop WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("route stop"))
    }

    pub async fn add_stop(
        &self,
        route_id: i64,
        location: &str,
        stop_type: StopType,
        stop_order: i64,
        authority_id: Option<i64>,
    ) -> Result<RouteStop> {
        let id = sqlx::query(
            r#"
            INSERT INTO route_stop (route_id, location, stop_type, stop_order, authority_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(route_id)
        .bind(location)
        .bind(stop_type)
        .bind(stop_order)
        .bind(authority_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_stop_by_id(id).await
    }

    /// Partial stop update; `authority_id: Some(None)` clears the reference
    pub async fn update_stop(&self, id: i64, update: StopUpdate) -> Result<RouteStop> {
        let mut stop = self.get_stop_by_id(id).await?;

        if let Some(location) = update.location {
            stop.location = location;
        }
        if let Some(stop_type) = update.stop_type {
            stop.stop_type = stop_type;
        }
        if let Some(stop_order) = update.stop_order {
            stop.stop_order = stop_order;
        }
        if let Some(authority_id) = update.authority_id {
            stop.authority_id = authority_id;
        }

        sqlx::query(
            r#"
            UPDATE route_stop
            SET location = ?, stop_type = ?, stop_order = ?, authority_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&stop.location)
        .bind(stop.stop_type)
        .bind(stop.stop_order)
        .bind(stop.authority_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(stop)
    }
}
