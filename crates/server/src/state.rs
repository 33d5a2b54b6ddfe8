use std::sync::Arc;

use shelfmark_core::{
    Authenticator, BookCatalog, BookStore, Config, ListManager, MembershipService, SanitizedConfig,
};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn BookStore>,
    lists: ListManager,
    membership: MembershipService,
    catalog: Option<Arc<dyn BookCatalog>>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        store: Arc<dyn BookStore>,
        catalog: Option<Arc<dyn BookCatalog>>,
    ) -> Self {
        let lists = ListManager::new(Arc::clone(&store));
        let membership = MembershipService::new(Arc::clone(&store));
        Self {
            config,
            authenticator,
            store,
            lists,
            membership,
            catalog,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    #[allow(dead_code)]
    pub fn store(&self) -> &Arc<dyn BookStore> {
        &self.store
    }

    pub fn lists(&self) -> &ListManager {
        &self.lists
    }

    pub fn membership(&self) -> &MembershipService {
        &self.membership
    }

    pub fn catalog(&self) -> Option<&Arc<dyn BookCatalog>> {
        self.catalog.as_ref()
    }
}
