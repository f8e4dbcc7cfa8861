/*
[INPUT]:  Market identifiers, request modes and normalized market data
[OUTPUT]: Typed Rust structs/enums shared by every exchange adapter
[POS]:    Data layer - exchange-independent type definitions
[UPDATE]: When domain types are added or renamed
*/

pub mod currency;
pub mod enums;
pub mod models;

pub use currency::*;
pub use enums::*;
pub use models::*;
