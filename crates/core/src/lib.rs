pub mod auth;
pub mod book;
pub mod catalog;
pub mod config;
pub mod shelf;
pub mod store;
pub mod testing;

pub use auth::{
    create_authenticator, ApiKeyAuthenticator, AuthError, AuthRequest, Authenticator, Identity,
    NoneAuthenticator,
};
pub use book::Book;
pub use catalog::{
    BookCatalog, BookCatalogError, CombinedCatalogClient, GoogleBooksClient, GoogleBooksConfig,
    NytBooksClient, NytBooksConfig,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthConfig, AuthMethod, CatalogsConfig,
    Config, ConfigError, DatabaseConfig, SanitizedConfig,
};
pub use shelf::{BookDetails, ListManager, MembershipService, ShelfError, ADDED_BOOKS_LIST};
pub use store::{BookEntry, BookStore, EntryUpdate, NewBookEntry, SqliteBookStore, StoreError};
