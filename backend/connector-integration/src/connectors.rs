pub mod sagepay;
pub use self::sagepay::Sagepay;
