//! Menu view coordinator: categories, products and their forms

use crate::core::{Category, DashboardApi, Filter, Product, RecordId, TavolaError};
use crate::forms::{CategoryForm, FormContext, ProductForm};
use crate::store::{CategoryStore, ProductStore};
use std::sync::{Arc, Mutex, PoisonError};

/// Wires the menu screen's user actions to the category and product stores
/// and their forms
pub struct MenuView {
    categories: CategoryStore,
    products: ProductStore,
    product_form: ProductForm,
    category_form: CategoryForm,
    selected_category: Mutex<Option<RecordId>>,
}

impl MenuView {
    pub fn new(api: Arc<dyn DashboardApi>) -> Self {
        Self {
            categories: CategoryStore::new(Arc::clone(&api)),
            products: ProductStore::new(api),
            product_form: ProductForm::new(),
            category_form: CategoryForm::new(),
            selected_category: Mutex::new(None),
        }
    }

    pub fn category_store(&self) -> &CategoryStore {
        &self.categories
    }

    pub fn product_store(&self) -> &ProductStore {
        &self.products
    }

    pub fn product_form(&self) -> &ProductForm {
        &self.product_form
    }

    pub fn category_form(&self) -> &CategoryForm {
        &self.category_form
    }

    /// Load categories and products concurrently
    pub async fn activate(&self) {
        let _ = tokio::join!(self.categories.load(), self.products.load());
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.items()
    }

    /// Products of the selected category, or all of them
    pub fn products(&self) -> Vec<Product> {
        self.products.filtered()
    }

    /// Products pointing at a category that no longer exists
    pub fn dangling_products(&self) -> Vec<Product> {
        let categories = self.categories.items();
        self.products
            .items()
            .into_iter()
            .filter(|p| !categories.iter().any(|c| c.id == p.category_id))
            .collect()
    }

    pub fn selected_category(&self) -> Option<RecordId> {
        *self
            .selected_category
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Narrow the product list to one category (`None` shows all)
    pub fn select_category(&self, category_id: Option<RecordId>) {
        *self
            .selected_category
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = category_id;
        self.products.set_filter(Filter::from(category_id));
    }

    /// First pending error message across both lists
    pub fn error(&self) -> Option<String> {
        self.categories.error().or_else(|| self.products.error())
    }

    // === Products ===

    /// Open the product form on a copy of `product`, or on a blank draft
    /// pre-filled with the selected category
    pub fn open_product_form(&self, product: Option<&Product>) {
        match product {
            Some(product) => self.product_form.open_existing(product),
            None => self.product_form.open_new(&FormContext {
                selected_category: self.selected_category(),
                categories: &[],
            }),
        }
    }

    pub fn close_product_form(&self) {
        self.product_form.close();
    }

    pub async fn save_product(&self) -> Result<(), TavolaError> {
        let categories = self.categories.items();
        let ctx = FormContext {
            selected_category: self.selected_category(),
            categories: &categories,
        };
        self.product_form.submit(&self.products, &ctx).await
    }

    /// Delete a product; the caller is responsible for asking confirmation
    pub async fn delete_product(&self, id: RecordId) -> bool {
        self.products.delete(id).await.is_ok()
    }

    // === Categories ===

    pub fn open_category_form(&self, category: Option<&Category>) {
        match category {
            Some(category) => self.category_form.open_existing(category),
            None => self.category_form.open_new(&FormContext::default()),
        }
    }

    pub fn close_category_form(&self) {
        self.category_form.close();
    }

    pub async fn save_category(&self) -> Result<(), TavolaError> {
        self.category_form
            .submit(&self.categories, &FormContext::default())
            .await
    }

    /// Delete a category, then reload both lists
    ///
    /// Products of the deleted category are not removed: they stay listed
    /// with a dangling reference and are reported by
    /// [`dangling_products`](Self::dangling_products).
    pub async fn delete_category(&self, id: RecordId) -> bool {
        if self.categories.delete(id).await.is_err() {
            return false;
        }
        if self.selected_category() == Some(id) {
            self.select_category(None);
        }
        let _ = self.products.load().await;

        let orphans = self.dangling_products();
        if !orphans.is_empty() {
            tracing::warn!(
                category_id = id,
                count = orphans.len(),
                "products left without a category"
            );
        }
        true
    }
}
