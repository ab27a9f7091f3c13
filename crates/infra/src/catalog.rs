//! Typed catalog access (products, branches, sellers) over the upstream API.

use async_trait::async_trait;

use ferremas_core::{Branch, BranchId, Product, ProductId, ProductUpdate, Seller, SellerId};

use crate::upstream::{Entity, UpstreamClient, UpstreamError};

/// Catalog data provider consumed by the API.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, UpstreamError>;
    async fn get_product(&self, id: ProductId) -> Result<Product, UpstreamError>;
    async fn create_product(&self, product: &Product) -> Result<Product, UpstreamError>;
    async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, UpstreamError>;

    async fn list_branches(&self) -> Result<Vec<Branch>, UpstreamError>;
    async fn get_branch(&self, id: BranchId) -> Result<Branch, UpstreamError>;

    async fn list_sellers(&self) -> Result<Vec<Seller>, UpstreamError>;
    async fn sellers_by_branch(&self, branch: BranchId) -> Result<Vec<Seller>, UpstreamError>;
    async fn get_seller(&self, id: SellerId) -> Result<Seller, UpstreamError>;
}

/// [`CatalogProvider`] backed by the upstream HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: UpstreamClient,
}

impl HttpCatalog {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn list_products(&self) -> Result<Vec<Product>, UpstreamError> {
        self.client.fetch(Entity::Products, None).await
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, UpstreamError> {
        self.client.fetch(Entity::Products, Some(id.get())).await
    }

    async fn create_product(&self, product: &Product) -> Result<Product, UpstreamError> {
        self.client
            .post_json(&Entity::Products.path(None), product)
            .await
    }

    async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, UpstreamError> {
        self.client
            .put_json(&Entity::Products.path(Some(id.get())), update)
            .await
    }

    async fn list_branches(&self) -> Result<Vec<Branch>, UpstreamError> {
        self.client.fetch(Entity::Branches, None).await
    }

    async fn get_branch(&self, id: BranchId) -> Result<Branch, UpstreamError> {
        self.client.fetch(Entity::Branches, Some(id.get())).await
    }

    async fn list_sellers(&self) -> Result<Vec<Seller>, UpstreamError> {
        self.client.fetch(Entity::Sellers, None).await
    }

    async fn sellers_by_branch(&self, branch: BranchId) -> Result<Vec<Seller>, UpstreamError> {
        let path = format!("{}/sellers", Entity::Branches.path(Some(branch.get())));
        self.client.get_json(&path).await
    }

    async fn get_seller(&self, id: SellerId) -> Result<Seller, UpstreamError> {
        self.client.fetch(Entity::Sellers, Some(id.get())).await
    }
}
