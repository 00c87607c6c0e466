// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Composite dashboard (BFF) wrapper.

use crate::client::{ApiResult, HttpClient};
use crate::error::NormalizedError;
use crate::models::DashboardData;

use super::paths;

#[derive(Clone)]
pub struct DashboardApi {
    client: HttpClient,
}

impl DashboardApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn for_customer(&self, customer_id: &str) -> ApiResult<DashboardData> {
        self.client.get(&paths::dashboard(customer_id)).await
    }

    /// Dashboard of the signed-in user.
    ///
    /// Fails with 401 when signed out and 404 when the user is not linked
    /// to a customer record.
    pub async fn for_current_user(&self) -> ApiResult<DashboardData> {
        let user = self
            .client
            .session()
            .user()
            .await
            .ok_or_else(NormalizedError::session_expired)?;
        let customer_id = user.customer_id.ok_or_else(|| {
            NormalizedError::new(404, "No customer profile is linked to this user")
        })?;
        self.for_customer(&customer_id).await
    }
}
