pub mod company;
pub mod db;
pub mod employee;
