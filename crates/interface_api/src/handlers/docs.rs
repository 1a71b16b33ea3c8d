//! API documentation endpoints

use axum::Json;
use serde::Serialize;
use utoipa::openapi::{OpenApi as OpenApiDoc, PathItemType};
use utoipa::{OpenApi, ToSchema};

use crate::openapi::ApiDoc;

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointDoc {
    pub method: String,
    pub path: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointListing {
    pub endpoints: Vec<EndpointDoc>,
}

/// List the available endpoints
#[utoipa::path(
    get,
    path = "/api/docs",
    tag = "docs",
    responses((status = 200, description = "Endpoint listing", body = EndpointListing))
)]
pub async fn api_docs() -> Json<EndpointListing> {
    Json(endpoint_listing(&ApiDoc::openapi()))
}

/// OpenAPI document
pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

/// Flattens the document's paths into one entry per method
pub fn endpoint_listing(doc: &OpenApiDoc) -> EndpointListing {
    let endpoints = doc
        .paths
        .paths
        .iter()
        .flat_map(|(path, item)| {
            item.operations.iter().map(move |(method, operation)| EndpointDoc {
                method: method_name(method).to_string(),
                path: path.clone(),
                description: operation
                    .summary
                    .clone()
                    .or_else(|| operation.description.clone())
                    .unwrap_or_default(),
            })
        })
        .collect();
    EndpointListing { endpoints }
}

fn method_name(method: &PathItemType) -> &'static str {
    match method {
        PathItemType::Get => "GET",
        PathItemType::Post => "POST",
        PathItemType::Put => "PUT",
        PathItemType::Delete => "DELETE",
        PathItemType::Options => "OPTIONS",
        PathItemType::Head => "HEAD",
        PathItemType::Patch => "PATCH",
        PathItemType::Trace => "TRACE",
        PathItemType::Connect => "CONNECT",
    }
}
