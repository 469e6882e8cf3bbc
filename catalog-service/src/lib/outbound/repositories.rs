pub mod product;
pub mod refresh_token;
pub mod user;

pub use product::PostgresProductRepository;
pub use refresh_token::PostgresRefreshTokenRepository;
pub use user::PostgresUserRepository;
