// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use crate::client::{ApiResult, HttpClient};
use crate::models::Notification;

use super::paths;

#[derive(Clone)]
pub struct NotificationsApi {
    client: HttpClient,
}

impl NotificationsApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> ApiResult<Vec<Notification>> {
        self.client.get(paths::NOTIFICATIONS).await
    }

    pub async fn by_customer(&self, customer_id: &str) -> ApiResult<Vec<Notification>> {
        self.client
            .get(&paths::notifications_by_customer(customer_id))
            .await
    }
}
