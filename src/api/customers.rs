// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Customer service wrapper.

use tracing::debug;

use crate::client::{ApiResult, HttpClient};
use crate::error::{FieldErrors, NormalizedError};
use crate::models::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
use crate::validation::{validate_customer_update, validate_new_customer};

use super::paths;

#[derive(Clone)]
pub struct CustomersApi {
    client: HttpClient,
}

impl CustomersApi {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ApiResult<Vec<Customer>> {
        self.client.get(paths::CUSTOMERS).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Customer> {
        self.client.get(&paths::customer(id)).await
    }

    /// Search by email and/or phone. Blank criteria are omitted.
    pub async fn search(&self, email: Option<&str>, phone: Option<&str>) -> ApiResult<Vec<Customer>> {
        let criterion = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let path = paths::with_query(
            paths::CUSTOMERS,
            &[("email", criterion(email)), ("phone", criterion(phone))],
        );
        self.client.get(&path).await
    }

    /// Invalid forms are rejected with per-field errors before any request.
    pub async fn create(&self, request: &CreateCustomerRequest) -> ApiResult<Customer> {
        validate_new_customer(request).map_err(form_rejected)?;
        self.client.post(paths::CUSTOMERS, request).await
    }

    /// Only the fields present in `request` are checked.
    pub async fn update(&self, id: &str, request: &UpdateCustomerRequest) -> ApiResult<Customer> {
        validate_customer_update(request).map_err(form_rejected)?;
        self.client.put(&paths::customer(id), request).await
    }

    pub async fn suspend(&self, id: &str) -> ApiResult<Customer> {
        self.client
            .put_empty(&format!("{}/suspend", paths::customer(id)))
            .await
    }

    pub async fn activate(&self, id: &str) -> ApiResult<Customer> {
        self.client
            .put_empty(&format!("{}/activate", paths::customer(id)))
            .await
    }
}

fn form_rejected(errors: FieldErrors) -> NormalizedError {
    debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Customer form rejected locally");
    NormalizedError::new(400, "Please correct the highlighted fields").with_field_errors(errors)
}
