use crate::catalog::DocumentCatalog;

/// Handler state. Cloning shares the same read-only catalog.
#[derive(Clone)]
pub struct ServeState {
    catalog: DocumentCatalog,
}

impl ServeState {
    pub fn new(catalog: DocumentCatalog) -> Self {
        Self { catalog }
    }

    pub(crate) fn catalog(&self) -> &DocumentCatalog {
        &self.catalog
    }
}
