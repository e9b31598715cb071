pub mod repository;
pub mod service;

pub use repository::{CompanyRepository, SeaOrmCompanyRepository};
pub use service::CompanyService;
