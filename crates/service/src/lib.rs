pub mod company;
pub mod domain;
pub mod employee;
pub mod errors;
pub mod pagination;
pub mod storage;
