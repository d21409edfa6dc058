pub mod health;
pub mod sagepay;
